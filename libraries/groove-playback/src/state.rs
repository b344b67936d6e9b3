//! Playback provenance and reconciliation
//!
//! Two sources can supply what the player bar shows: the remote device (live
//! state pushed through the bridge) and the local queue store (a selection
//! with no real playback behind it). `reconcile` picks one, and only one.

use groove_core::Track;

use crate::bridge::RemoteSnapshot;
use crate::queue::QueueStore;

/// Live device state with an active track
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteState {
    /// Track on the device
    pub track: Track,

    /// Device is playing
    pub is_playing: bool,

    /// Device position
    pub position_ms: u64,
}

/// Local selection
#[derive(Debug, Clone, PartialEq)]
pub struct LocalState {
    /// Selected track
    pub track: Track,

    /// Local play flag
    pub is_playing: bool,

    /// Position in the local queue
    pub index: usize,

    /// Local queue length
    pub queue_len: usize,
}

/// Which source currently supplies the displayed playback fields
#[derive(Debug, Clone, PartialEq)]
pub enum Provenance {
    /// The device is ready and reports a track
    Remote(RemoteState),

    /// No usable device state; a track is selected locally
    Local(LocalState),

    /// Nothing to show
    Empty,
}

impl Provenance {
    /// Track being shown
    pub fn track(&self) -> Option<&Track> {
        match self {
            Self::Remote(remote) => Some(&remote.track),
            Self::Local(local) => Some(&local.track),
            Self::Empty => None,
        }
    }

    /// Whether the shown track is playing
    pub fn is_playing(&self) -> bool {
        match self {
            Self::Remote(remote) => remote.is_playing,
            Self::Local(local) => local.is_playing,
            Self::Empty => false,
        }
    }

    /// Position in the shown track (always 0 for local state)
    pub fn position_ms(&self) -> u64 {
        match self {
            Self::Remote(remote) => remote.position_ms,
            Self::Local(_) | Self::Empty => 0,
        }
    }

    /// Duration of the shown track (0 when unknown)
    pub fn duration_ms(&self) -> u64 {
        self.track().map_or(0, Track::duration_ms)
    }

    /// Whether this is live device state
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// Pick the provenance to display
///
/// Remote wins when the device is ready and reports a track; otherwise the
/// local selection; otherwise nothing.
pub fn reconcile(
    remote: Option<&RemoteSnapshot>,
    device_ready: bool,
    local: &QueueStore,
) -> Provenance {
    if device_ready {
        if let Some(snapshot) = remote {
            if let Some(track) = &snapshot.track {
                return Provenance::Remote(RemoteState {
                    track: track.clone(),
                    is_playing: snapshot.is_playing,
                    position_ms: snapshot.position_ms,
                });
            }
        }
    }

    match local.current() {
        Some(track) => Provenance::Local(LocalState {
            track: track.clone(),
            is_playing: local.is_playing(),
            index: local.index(),
            queue_len: local.len(),
        }),
        None => Provenance::Empty,
    }
}

/// Flattened playback state for consumers that do not care about provenance
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Whether the shown track is playing
    pub is_playing: bool,

    /// Shown track
    pub current_track: Option<Track>,

    /// Position, never past the track duration
    pub position_ms: u64,

    /// Output volume, 0.0-1.0
    pub volume: f32,

    /// Device is ready
    pub device_ready: bool,
}

impl PlaybackState {
    /// Flatten a provenance
    pub fn from_provenance(provenance: &Provenance, volume: f32, device_ready: bool) -> Self {
        let current_track = provenance.track().cloned();
        let position_ms = match &current_track {
            Some(track) if track.duration_ms() > 0 => provenance.position_ms().min(track.duration_ms()),
            _ => provenance.position_ms(),
        };

        Self {
            is_playing: provenance.is_playing(),
            current_track,
            position_ms,
            volume: volume.clamp(0.0, 1.0),
            device_ready,
        }
    }
}
