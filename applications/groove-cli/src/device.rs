/// Account device adapter
///
/// Drives one of the account's existing playback devices (a desktop app, a
/// phone, a web player tab) through the backend instead of hosting a player
/// in-process. Readiness comes from the backend's device list; the first
/// state snapshot from its playback state.
use async_trait::async_trait;
use groove_client::{CatalogTrack, Device, GrooveClient, PlaybackStatus};
use groove_playback::events::{DeviceAlbum, DeviceArtist, DeviceInfo, DeviceTrack, TrackWindow};
use groove_playback::{
    DeviceEvent, DeviceEventSender, DeviceFactory, DeviceOptions, DeviceState, PlaybackDevice,
    PlaybackError,
};
use tracing::{debug, info, warn};

/// Account device driven through the backend
///
/// Only `play` and `pause` reach the device, via the backend's transport
/// endpoints. Resume, skip, seek and volume have no backend endpoint and fail
/// with a device error, so `PlayerController::set_volume_percent` and
/// `toggle_mute` update the cached level but leave that error in the slot.
pub struct AccountDevice {
    client: GrooveClient,
    options: DeviceOptions,
    events: DeviceEventSender,
}

impl AccountDevice {
    /// Factory for the playback bridge
    pub fn factory(client: GrooveClient) -> impl DeviceFactory {
        move |options: DeviceOptions, events: DeviceEventSender| -> Box<dyn PlaybackDevice> {
            Box::new(AccountDevice {
                client: client.clone(),
                options,
                events,
            })
        }
    }

    fn unsupported(action: &str) -> groove_playback::Result<()> {
        Err(PlaybackError::Device(format!(
            "{} is not available for account devices",
            action
        )))
    }
}

#[async_trait]
impl PlaybackDevice for AccountDevice {
    async fn connect(&mut self) -> groove_playback::Result<bool> {
        let token = (self.options.token_supplier)();
        let playback = self.client.playback(&token);

        let devices = match playback.devices().await {
            Ok(devices) => devices,
            Err(e) if e.is_auth_failure() => {
                self.events.emit(DeviceEvent::AuthenticationError {
                    message: e.to_string(),
                });
                return Ok(true);
            }
            Err(e) => {
                warn!(error = %e, "Failed to list account devices");
                return Err(PlaybackError::Device(e.to_string()));
            }
        };

        let Some(device_id) = pick_device(&devices, &self.options.name).and_then(|d| d.id.clone())
        else {
            self.events.emit(DeviceEvent::InitializationError {
                message: format!(
                    "No device named \"{}\" and no active device; open a player first",
                    self.options.name
                ),
            });
            return Ok(true);
        };

        info!(device_id = %device_id, "Adopted account device");
        self.events.emit(DeviceEvent::Ready { device_id });

        match playback.state().await {
            Ok(Some(status)) => {
                self.events.emit(DeviceEvent::PlayerStateChanged {
                    state: Some(device_state(&status)),
                });
            }
            Ok(None) => debug!("No active playback"),
            Err(e) => warn!(error = %e, "Failed to fetch playback state"),
        }

        Ok(true)
    }

    async fn disconnect(&mut self) {
        debug!(name = %self.options.name, "Released account device");
    }

    async fn resume(&mut self) -> groove_playback::Result<()> {
        Self::unsupported("Resume")
    }

    async fn next_track(&mut self) -> groove_playback::Result<()> {
        Self::unsupported("Skip")
    }

    async fn previous_track(&mut self) -> groove_playback::Result<()> {
        Self::unsupported("Skip")
    }

    async fn seek(&mut self, _position_ms: u64) -> groove_playback::Result<()> {
        Self::unsupported("Seek")
    }

    async fn set_volume(&mut self, _level: f32) -> groove_playback::Result<()> {
        Self::unsupported("Volume")
    }
}

/// Device with the configured name, else the active one
pub fn pick_device<'a>(devices: &'a [Device], name: &str) -> Option<&'a Device> {
    devices
        .iter()
        .find(|d| d.name == name)
        .or_else(|| devices.iter().find(|d| d.is_active))
}

/// Translate the backend's playback state into a device state
pub fn device_state(status: &PlaybackStatus) -> DeviceState {
    DeviceState {
        paused: !status.is_playing,
        position: status.progress_ms.unwrap_or(0),
        track_window: TrackWindow {
            current_track: status.item.as_ref().map(device_track),
        },
        device: status.device.as_ref().and_then(|d| {
            d.id.clone().map(|device_id| DeviceInfo {
                device_id,
                name: d.name.clone(),
                device_type: d.device_type.clone(),
            })
        }),
    }
}

fn device_track(track: &CatalogTrack) -> DeviceTrack {
    DeviceTrack {
        id: Some(track.id.clone()),
        name: track.name.clone(),
        uri: track.uri.clone(),
        duration_ms: track.duration_ms,
        artists: track
            .artists
            .iter()
            .map(|a| DeviceArtist { name: a.name.clone() })
            .collect(),
        album: DeviceAlbum {
            name: track.album.name.clone(),
            images: track.album.images.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: &str, name: &str, active: bool) -> Device {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": name, "type": "Computer", "is_active": active
        }))
        .unwrap()
    }

    #[test]
    fn prefers_named_device() {
        let devices = vec![device("a", "Phone", true), device("b", "Groove Web Player", false)];
        assert_eq!(pick_device(&devices, "Groove Web Player").unwrap().name, "Groove Web Player");
    }

    #[test]
    fn falls_back_to_active_device() {
        let devices = vec![device("a", "Laptop", false), device("b", "Phone", true)];
        assert_eq!(pick_device(&devices, "Groove Web Player").unwrap().name, "Phone");
        assert!(pick_device(&devices[..1], "Groove Web Player").is_none());
    }

    #[test]
    fn translates_playback_status() {
        let status: PlaybackStatus = serde_json::from_value(serde_json::json!({
            "is_playing": false,
            "progress_ms": 12000,
            "item": {
                "id": "t1",
                "name": "Song",
                "uri": "spotify:track:t1",
                "duration_ms": 200000,
                "artists": [{"name": "Artist"}],
                "album": {"name": "Album", "images": [{"url": "https://img/1.jpg"}]}
            },
            "device": {"id": "dev-1", "name": "Phone", "type": "Smartphone"}
        }))
        .unwrap();

        let state = device_state(&status);

        assert!(state.paused);
        assert_eq!(state.position, 12_000);
        assert_eq!(state.device.unwrap().device_type, "Smartphone");
        let track = state.track_window.current_track.unwrap().to_track();
        assert_eq!(track.artist(), "Artist");
        assert_eq!(track.artwork_url(), "https://img/1.jpg");
    }
}
