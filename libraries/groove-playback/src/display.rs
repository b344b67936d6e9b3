//! Player bar display model

use groove_core::time::format_time;
use serde::Serialize;

use crate::state::Provenance;
use crate::volume::VolumeControl;

/// Where the displayed fields came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Live device state
    Remote,
    /// Local selection
    Local,
}

/// Everything the player bar renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDisplay {
    /// Provenance of the fields below
    pub source: Source,
    /// Track title
    pub title: String,
    /// Artist
    pub artist: String,
    /// Album
    pub album: String,
    /// Cover art
    pub artwork_url: String,
    /// Play/pause icon state
    pub is_playing: bool,
    /// Position
    pub position_ms: u64,
    /// Duration (0 when unknown)
    pub duration_ms: u64,
    /// Progress bar, 0-100
    pub progress_percent: f64,
    /// Elapsed label (`m:ss`)
    pub elapsed: String,
    /// Duration label (`m:ss`)
    pub total: String,
    /// Volume slider, 0-100
    pub volume_percent: u8,
    /// Mute icon state
    pub muted: bool,
    /// Skip buttons enabled (device ready, or a local queue to walk)
    pub can_skip: bool,
}

impl PlayerDisplay {
    /// Build the display model
    ///
    /// Returns `None` for `Provenance::Empty`: no player bar is shown at all.
    pub fn build(provenance: &Provenance, volume: &VolumeControl, device_ready: bool) -> Option<Self> {
        let track = provenance.track()?;
        let source = if provenance.is_remote() {
            Source::Remote
        } else {
            Source::Local
        };

        let duration_ms = track.duration_ms();
        let position_ms = provenance.position_ms();

        Some(Self {
            source,
            title: track.title().to_string(),
            artist: track.artist().to_string(),
            album: track.album().to_string(),
            artwork_url: track.artwork_url().to_string(),
            is_playing: provenance.is_playing(),
            position_ms,
            duration_ms,
            progress_percent: progress_percent(position_ms, duration_ms),
            elapsed: format_time(position_ms),
            total: format_time(duration_ms),
            volume_percent: volume.displayed_level(),
            muted: volume.is_muted(),
            can_skip: device_ready
                || matches!(provenance, Provenance::Local(local) if local.queue_len > 1),
        })
    }
}

/// Position as a 0-100 fraction of duration (0 when duration is unknown)
pub fn progress_percent(position_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    (position_ms as f64 / duration_ms as f64 * 100.0).clamp(0.0, 100.0)
}
