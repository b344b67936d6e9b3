//! Device events
//!
//! The playback device pushes notifications at arbitrary times. Each one is a
//! `DeviceEvent`, tagged with the vendor SDK's listener name so hosts that
//! forward SDK callbacks as JSON can decode them directly:
//!
//! ```json
//! {"event": "ready", "device_id": "abc123"}
//! {"event": "player_state_changed", "state": {"paused": false, "position": 1200, ...}}
//! ```

use groove_core::{Image, Track};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Notification pushed by the playback device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DeviceEvent {
    /// SDK failed to initialize
    InitializationError {
        /// SDK message
        message: String,
    },

    /// Credential rejected by the SDK
    AuthenticationError {
        /// SDK message
        message: String,
    },

    /// Account not eligible for playback
    AccountError {
        /// SDK message
        message: String,
    },

    /// Item could not be played
    PlaybackError {
        /// SDK message
        message: String,
    },

    /// Playback state changed; `None` when the device has no state to report
    PlayerStateChanged {
        /// New state
        #[serde(default)]
        state: Option<DeviceState>,
    },

    /// Device registered and can receive playback
    Ready {
        /// Device identifier used by transport requests
        device_id: String,
    },

    /// Device went offline
    NotReady {
        /// Device identifier
        device_id: String,
    },
}

impl DeviceEvent {
    /// Decode an event forwarded as JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// SDK listener name
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitializationError { .. } => "initialization_error",
            Self::AuthenticationError { .. } => "authentication_error",
            Self::AccountError { .. } => "account_error",
            Self::PlaybackError { .. } => "playback_error",
            Self::PlayerStateChanged { .. } => "player_state_changed",
            Self::Ready { .. } => "ready",
            Self::NotReady { .. } => "not_ready",
        }
    }
}

/// Raw device playback state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    /// Whether playback is paused
    #[serde(default)]
    pub paused: bool,

    /// Position in the current item
    #[serde(default)]
    pub position: u64,

    /// Items around the current one
    #[serde(default)]
    pub track_window: TrackWindow,

    /// Device the state belongs to
    #[serde(default)]
    pub device: Option<DeviceInfo>,
}

/// Track window of a device state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackWindow {
    /// Item being played
    #[serde(default)]
    pub current_track: Option<DeviceTrack>,
}

/// Track as reported by the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceTrack {
    /// Catalog id (absent for local files)
    #[serde(default)]
    pub id: Option<String>,

    /// Track name
    pub name: String,

    /// Playable URI
    pub uri: String,

    /// Duration
    #[serde(default)]
    pub duration_ms: u64,

    /// Credited artists
    #[serde(default)]
    pub artists: Vec<DeviceArtist>,

    /// Album
    #[serde(default)]
    pub album: DeviceAlbum,
}

/// Artist credit on a device track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceArtist {
    /// Artist name
    pub name: String,
}

/// Album of a device track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceAlbum {
    /// Album name
    #[serde(default)]
    pub name: String,

    /// Cover images, largest first
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Device description attached to a state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device identifier
    pub device_id: String,

    /// Device name
    #[serde(default)]
    pub name: String,

    /// Device kind (`Computer`, `Smartphone`, ...)
    #[serde(default, rename = "type")]
    pub device_type: String,
}

impl DeviceTrack {
    /// Convert into the shared track model
    ///
    /// The first credited artist and the first (largest) cover are used, as the
    /// player bar shows them.
    pub fn to_track(&self) -> Track {
        let id = self.id.clone().unwrap_or_else(|| self.uri.clone());
        let artist = self.artists.first().map(|a| a.name.as_str()).unwrap_or_default();
        let mut track = Track::new(id, &self.name, artist, &self.album.name, self.duration_ms)
            .with_source_uri(&self.uri);
        if let Some(image) = self.album.images.first() {
            track = track.with_artwork(&image.url);
        }
        track
    }
}

/// Sending half handed to a playback device
///
/// Events are delivered to the bridge in send order, one at a time.
#[derive(Debug, Clone)]
pub struct DeviceEventSender {
    tx: mpsc::UnboundedSender<DeviceEvent>,
}

impl DeviceEventSender {
    pub(crate) fn new(tx: mpsc::UnboundedSender<DeviceEvent>) -> Self {
        Self { tx }
    }

    /// Push an event to the bridge
    ///
    /// Returns `false` once the bridge has been torn down.
    pub fn emit(&self, event: DeviceEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Whether the bridge stopped listening
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
