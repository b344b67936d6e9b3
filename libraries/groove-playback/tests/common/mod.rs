//! Shared fakes for bridge and controller tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use groove_core::{PlayRequest, Transport};
use groove_playback::events::{DeviceAlbum, DeviceArtist, DeviceTrack, TrackWindow};
use groove_playback::{
    BridgeConfig, DeviceEvent, DeviceEventSender, DeviceFactory, DeviceOptions, DeviceState,
    PlaybackBridge, PlaybackDevice, PlaybackError,
};
use mockall::mock;

mock! {
    pub Transport {}

    #[async_trait]
    impl Transport for Transport {
        async fn play(&self, access_token: &str, request: PlayRequest) -> groove_core::Result<()>;
        async fn pause(&self, access_token: &str, device_id: &str) -> groove_core::Result<()>;
    }
}

/// What the fake does when the bridge connects
#[derive(Debug, Clone)]
pub enum OnConnect {
    /// Accept and report ready with this id
    Ready(String),
    /// Accept and report this event instead of readiness
    Emit(DeviceEvent),
    /// Accept and stay silent
    Silent,
    /// Refuse the connection
    Refuse,
}

/// Everything the fake device saw, shared with the test
#[derive(Default)]
pub struct DeviceLog {
    pub calls: Vec<String>,
    pub options: Option<DeviceOptions>,
    pub events: Option<DeviceEventSender>,
    pub fail_commands: bool,
}

pub type SharedLog = Arc<Mutex<DeviceLog>>;

pub struct FakeDevice {
    on_connect: OnConnect,
    log: SharedLog,
}

impl FakeDevice {
    fn record(&self, call: impl Into<String>) -> groove_playback::Result<()> {
        let mut log = self.log.lock().unwrap();
        log.calls.push(call.into());
        if log.fail_commands {
            Err(PlaybackError::Device("device offline".into()))
        } else {
            Ok(())
        }
    }

    fn emit(&self, event: DeviceEvent) {
        if let Some(events) = &self.log.lock().unwrap().events {
            events.emit(event);
        }
    }
}

#[async_trait]
impl PlaybackDevice for FakeDevice {
    async fn connect(&mut self) -> groove_playback::Result<bool> {
        self.log.lock().unwrap().calls.push("connect".into());
        match self.on_connect.clone() {
            OnConnect::Ready(device_id) => {
                self.emit(DeviceEvent::Ready { device_id });
                Ok(true)
            }
            OnConnect::Emit(event) => {
                self.emit(event);
                Ok(true)
            }
            OnConnect::Silent => Ok(true),
            OnConnect::Refuse => Ok(false),
        }
    }

    async fn disconnect(&mut self) {
        self.log.lock().unwrap().calls.push("disconnect".into());
    }

    async fn resume(&mut self) -> groove_playback::Result<()> {
        self.record("resume")
    }

    async fn next_track(&mut self) -> groove_playback::Result<()> {
        self.record("next_track")
    }

    async fn previous_track(&mut self) -> groove_playback::Result<()> {
        self.record("previous_track")
    }

    async fn seek(&mut self, position_ms: u64) -> groove_playback::Result<()> {
        self.record(format!("seek:{}", position_ms))
    }

    async fn set_volume(&mut self, level: f32) -> groove_playback::Result<()> {
        self.record(format!("set_volume:{:.2}", level))
    }
}

/// Factory that builds `FakeDevice`s sharing one log
pub fn fake_factory(on_connect: OnConnect) -> (Arc<dyn DeviceFactory>, SharedLog) {
    let log: SharedLog = Arc::new(Mutex::new(DeviceLog::default()));
    let shared = log.clone();

    let factory = move |options: DeviceOptions, events: DeviceEventSender| -> Box<dyn PlaybackDevice> {
        {
            let mut log = shared.lock().unwrap();
            log.calls.push("create".into());
            log.options = Some(options);
            log.events = Some(events);
        }
        Box::new(FakeDevice {
            on_connect: on_connect.clone(),
            log: shared.clone(),
        })
    };

    (Arc::new(factory), log)
}

pub fn test_config() -> BridgeConfig {
    BridgeConfig {
        ready_timeout: Duration::from_secs(2),
        ..BridgeConfig::default()
    }
}

pub fn bridge_with(on_connect: OnConnect, transport: MockTransport) -> (PlaybackBridge, SharedLog) {
    let (factory, log) = fake_factory(on_connect);
    (PlaybackBridge::new(test_config(), factory, Arc::new(transport)), log)
}

/// Push an event as if the device sent it
pub fn emit(log: &SharedLog, event: DeviceEvent) -> bool {
    log.lock()
        .unwrap()
        .events
        .as_ref()
        .map(|events| events.emit(event))
        .unwrap_or(false)
}

pub fn calls(log: &SharedLog) -> Vec<String> {
    log.lock().unwrap().calls.clone()
}

pub fn state_event(id: &str, name: &str, position: u64, duration_ms: u64, paused: bool) -> DeviceEvent {
    DeviceEvent::PlayerStateChanged {
        state: Some(DeviceState {
            paused,
            position,
            track_window: TrackWindow {
                current_track: Some(DeviceTrack {
                    id: Some(id.to_string()),
                    name: name.to_string(),
                    uri: format!("spotify:track:{}", id),
                    duration_ms,
                    artists: vec![DeviceArtist {
                        name: "Remote Artist".into(),
                    }],
                    album: DeviceAlbum {
                        name: "Remote Album".into(),
                        images: Vec::new(),
                    },
                }),
            },
            device: None,
        }),
    }
}
