//! External playback bridge
//!
//! Wraps a remote, possibly offline playback device behind one command/event
//! contract:
//!
//! ```text
//!   device ──(mpsc, one event at a time)──▶ bridge ──(watch, latest snapshot)──▶ views
//!   views  ──(commands)──▶ bridge ──▶ transport (play/pause) or device (everything else)
//! ```
//!
//! Every command failure is converted to a `PlaybackError`, returned to the
//! caller, and stored in the error slot for the view to render. A successful
//! command clears the slot.

use std::sync::Arc;

use groove_core::{PlayRequest, Track, Transport};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::device::{DeviceFactory, DeviceOptions, PlaybackDevice, TokenSupplier};
use crate::error::{PlaybackError, Result};
use crate::events::{DeviceEvent, DeviceEventSender, DeviceInfo, DeviceState};
use crate::types::BridgeConfig;

/// Remote playback state as last pushed by the device
///
/// Replaced as a whole on every state change, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSnapshot {
    /// Device is playing
    pub is_playing: bool,

    /// Item on the device, if any
    pub track: Option<Track>,

    /// Position in the item, never past its duration
    pub position_ms: u64,

    /// Device that reported the state
    pub device: Option<DeviceInfo>,
}

impl RemoteSnapshot {
    /// Build a snapshot from a raw device state
    pub fn from_state(state: &DeviceState) -> Self {
        let track = state
            .track_window
            .current_track
            .as_ref()
            .map(|t| t.to_track());

        let position_ms = match &track {
            Some(t) if t.duration_ms() > 0 => state.position.min(t.duration_ms()),
            _ => state.position,
        };

        Self {
            is_playing: !state.paused,
            track,
            position_ms,
            device: state.device.clone(),
        }
    }
}

/// Bridge between the player view and a remote playback device
pub struct PlaybackBridge {
    config: BridgeConfig,
    factory: Arc<dyn DeviceFactory>,
    transport: Arc<dyn Transport>,

    /// Connected device (None before initialize / after teardown)
    device: Option<Box<dyn PlaybackDevice>>,

    /// Receiving half of the device event channel
    events: Option<mpsc::UnboundedReceiver<DeviceEvent>>,

    /// Identifier reported by the last `ready` event
    device_id: Option<String>,

    /// Device reported `ready` and not `not_ready` since
    ready: bool,

    /// Credential; observed by the device's token supplier
    token: watch::Sender<Option<String>>,

    /// Latest remote state
    snapshot: watch::Sender<Option<RemoteSnapshot>>,

    /// Last failure, for the view
    error: Option<PlaybackError>,
}

impl PlaybackBridge {
    /// Create a bridge; nothing connects until `initialize`
    pub fn new(
        config: BridgeConfig,
        factory: Arc<dyn DeviceFactory>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let (token, _) = watch::channel(None);
        let (snapshot, _) = watch::channel(None);

        Self {
            config,
            factory,
            transport,
            device: None,
            events: None,
            device_id: None,
            ready: false,
            token,
            snapshot,
            error: None,
        }
    }

    // ===== Lifecycle =====

    /// Connect a device and wait for it to become ready
    ///
    /// Returns the device identifier. Calling this while a device is connected
    /// is a no-op. On failure the error is recorded, readiness stays false and
    /// the half-initialized device is released so a later call can retry.
    pub async fn initialize(&mut self, auth_token: &str) -> Result<String> {
        if self.device.is_some() {
            debug!("Playback device already connected");
            return self.device_id.clone().ok_or(PlaybackError::NotReady);
        }

        self.set_auth_token(auth_token);
        self.error = None;

        let (tx, rx) = mpsc::unbounded_channel();
        let options = DeviceOptions {
            name: self.config.device_name.clone(),
            volume: self.config.initial_volume.clamp(0.0, 1.0),
            token_supplier: self.token_supplier(),
        };

        info!(name = %options.name, volume = options.volume, "Connecting playback device");
        let mut device = self.factory.create(options, DeviceEventSender::new(tx));

        match device.connect().await {
            Ok(true) => {}
            Ok(false) => {
                device.disconnect().await;
                return Err(self.fail(PlaybackError::ConnectFailed));
            }
            Err(e) => {
                device.disconnect().await;
                warn!(error = %e, "Playback device connect failed");
                return Err(self.fail(PlaybackError::ConnectFailed));
            }
        }

        info!("Connected to playback service");
        self.device = Some(device);
        self.events = Some(rx);

        match self.await_ready().await {
            Ok(device_id) => Ok(device_id),
            Err(e) => {
                self.teardown().await;
                Err(e)
            }
        }
    }

    /// Wait for the first readiness outcome after connecting
    async fn await_ready(&mut self) -> Result<String> {
        let deadline = tokio::time::Instant::now() + self.config.ready_timeout;

        loop {
            let Some(rx) = self.events.as_mut() else {
                return Err(self.fail(PlaybackError::NotReady));
            };

            let event = match tokio::time::timeout_at(deadline, rx.recv()).await {
                Ok(Some(event)) => event,
                Ok(None) => return Err(self.fail(PlaybackError::ConnectFailed)),
                Err(_) => return Err(self.fail(PlaybackError::ReadyTimeout)),
            };

            self.apply(event);

            if self.ready {
                if let Some(device_id) = &self.device_id {
                    return Ok(device_id.clone());
                }
            }

            if let Some(err) = self.error.as_ref().filter(|e| e.is_device_reported()) {
                return Err(err.clone());
            }
        }
    }

    /// Release the device and stop event delivery
    pub async fn teardown(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.disconnect().await;
            info!("Disconnected playback device");
        }

        if let Some(mut rx) = self.events.take() {
            rx.close();
        }

        self.ready = false;
        self.device_id = None;
        self.snapshot.send_replace(None);
    }

    /// Replace the credential (e.g. after a token refresh)
    pub fn set_auth_token(&mut self, token: &str) {
        self.token.send_replace(Some(token.to_string()));
    }

    /// Forget the credential (logout)
    pub fn clear_auth_token(&mut self) {
        self.token.send_replace(None);
    }

    fn token_supplier(&self) -> TokenSupplier {
        let rx = self.token.subscribe();
        Arc::new(move || rx.borrow().clone().unwrap_or_default())
    }

    // ===== Events =====

    /// Apply every pending device event, in order
    ///
    /// Returns the number applied.
    pub fn pump_events(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.events.as_mut().and_then(|rx| rx.try_recv().ok()) {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next device event and apply it
    ///
    /// Returns `false` when no device is connected or the device hung up.
    pub async fn next_event(&mut self) -> bool {
        let Some(rx) = self.events.as_mut() else {
            return false;
        };

        match rx.recv().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, event: DeviceEvent) {
        debug!(event = event.name(), "Device event");

        match event {
            DeviceEvent::InitializationError { message } => {
                self.fail(PlaybackError::Initialization(message));
            }
            DeviceEvent::AuthenticationError { message } => {
                self.fail(PlaybackError::Authentication(message));
            }
            DeviceEvent::AccountError { message } => {
                self.fail(PlaybackError::Account(message));
            }
            DeviceEvent::PlaybackError { message } => {
                self.fail(PlaybackError::Playback(message));
            }
            DeviceEvent::PlayerStateChanged { state: Some(state) } => {
                self.on_state_changed(&state);
            }
            DeviceEvent::PlayerStateChanged { state: None } => {}
            DeviceEvent::Ready { device_id } => {
                info!(device_id = %device_id, "Playback device ready");
                self.device_id = Some(device_id);
                self.ready = true;
                self.error = None;
            }
            DeviceEvent::NotReady { device_id } => {
                warn!(device_id = %device_id, "Playback device went offline");
                self.ready = false;
            }
        }
    }

    /// Replace the remote snapshot with a new device state
    pub fn on_state_changed(&mut self, state: &DeviceState) {
        let snapshot = RemoteSnapshot::from_state(state);
        debug!(
            is_playing = snapshot.is_playing,
            position_ms = snapshot.position_ms,
            track_id = snapshot.track.as_ref().map(Track::id),
            "Remote state changed"
        );
        self.snapshot.send_replace(Some(snapshot));
    }

    // ===== Transport commands =====

    /// Start `track_uri` at `position_ms` on this device
    pub async fn play(&mut self, track_uri: &str, position_ms: u64) -> Result<()> {
        let (token, device_id) = match self.transport_prerequisites() {
            Ok(prerequisites) => prerequisites,
            Err(e) => return Err(self.fail(e)),
        };

        debug!(track_uri = %track_uri, position_ms, device_id = %device_id, "Requesting playback");
        let request = PlayRequest {
            track_uri: track_uri.to_string(),
            position_ms,
            device_id,
        };

        let result = self
            .transport
            .play(&token, request)
            .await
            .map_err(|e| PlaybackError::transport("Error playing track", &e));
        self.settle(result)
    }

    /// Pause this device
    pub async fn pause(&mut self) -> Result<()> {
        let (token, device_id) = match self.transport_prerequisites() {
            Ok(prerequisites) => prerequisites,
            Err(e) => return Err(self.fail(e)),
        };

        debug!(device_id = %device_id, "Requesting pause");
        let result = self
            .transport
            .pause(&token, &device_id)
            .await
            .map_err(|e| PlaybackError::transport("Error pausing track", &e));
        self.settle(result)
    }

    fn transport_prerequisites(&self) -> Result<(String, String)> {
        let device_id = self
            .device_id
            .clone()
            .filter(|_| self.ready)
            .ok_or(PlaybackError::NotReady)?;
        let token = self
            .token
            .borrow()
            .clone()
            .ok_or(PlaybackError::NotAuthenticated)?;
        Ok((token, device_id))
    }

    // ===== Device commands =====

    /// Resume the paused item
    pub async fn resume(&mut self) -> Result<()> {
        let result = match self.device.as_mut() {
            Some(device) => device
                .resume()
                .await
                .map_err(|e| device_failure("Error resuming track", &e)),
            None => Err(PlaybackError::NotReady),
        };
        self.settle(result)
    }

    /// Skip to the next item
    pub async fn skip_next(&mut self) -> Result<()> {
        let result = match self.device.as_mut() {
            Some(device) => device
                .next_track()
                .await
                .map_err(|e| device_failure("Error skipping to next track", &e)),
            None => Err(PlaybackError::NotReady),
        };
        self.settle(result)
    }

    /// Skip to the previous item
    pub async fn skip_previous(&mut self) -> Result<()> {
        let result = match self.device.as_mut() {
            Some(device) => device
                .previous_track()
                .await
                .map_err(|e| device_failure("Error skipping to previous track", &e)),
            None => Err(PlaybackError::NotReady),
        };
        self.settle(result)
    }

    /// Seek within the current item
    pub async fn seek(&mut self, position_ms: u64) -> Result<()> {
        let result = match self.device.as_mut() {
            Some(device) => device
                .seek(position_ms)
                .await
                .map_err(|e| device_failure("Error seeking", &e)),
            None => Err(PlaybackError::NotReady),
        };
        self.settle(result)
    }

    /// Set device volume (clamped to 0.0-1.0)
    pub async fn set_volume(&mut self, level: f32) -> Result<()> {
        let level = if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) };
        let result = match self.device.as_mut() {
            Some(device) => device
                .set_volume(level)
                .await
                .map_err(|e| device_failure("Error setting volume", &e)),
            None => Err(PlaybackError::NotReady),
        };
        self.settle(result)
    }

    // ===== Error slot =====

    fn settle(&mut self, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, err: PlaybackError) -> PlaybackError {
        warn!(error = %err, "Playback bridge error");
        self.error = Some(err.clone());
        err
    }

    /// Last failure, if any
    pub fn error(&self) -> Option<&PlaybackError> {
        self.error.as_ref()
    }

    /// Last failure as a user-facing message
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(PlaybackError::user_message)
    }

    /// Dismiss the current failure
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ===== State =====

    /// Device is ready for transport commands
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// A device is connected (it may not be ready yet)
    pub fn is_connected(&self) -> bool {
        self.device.is_some()
    }

    /// Identifier from the last `ready` event
    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    /// Latest remote snapshot
    pub fn snapshot(&self) -> Option<RemoteSnapshot> {
        self.snapshot.borrow().clone()
    }

    /// Follow remote snapshots
    ///
    /// The receiver always observes whole snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Option<RemoteSnapshot>> {
        self.snapshot.subscribe()
    }

    /// Bridge settings
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

fn device_failure(action: &str, err: &PlaybackError) -> PlaybackError {
    warn!(error = %err, action, "Device call failed");
    PlaybackError::device(action)
}
