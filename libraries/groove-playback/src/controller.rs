//! Player controller - the application-level player store
//!
//! Owns the queue store, the volume cache and the bridge, and turns user
//! intents (toggle, seek, volume, skip, select) into the right downstream
//! call. Passed by reference to whatever renders the player; there is no
//! global instance.

use groove_core::{Collection, Track};
use tracing::debug;

use crate::bridge::PlaybackBridge;
use crate::display::PlayerDisplay;
use crate::error::Result;
use crate::queue::QueueStore;
use crate::state::{reconcile, PlaybackState, Provenance};
use crate::types::Direction;
use crate::views;
use crate::volume::VolumeControl;

/// What a play/pause press should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleAction {
    /// Pause the device
    Pause,

    /// Ask the device to play `uri` from `position_ms`
    Play {
        /// Item to play
        uri: String,
        /// Start offset
        position_ms: u64,
    },

    /// Flip the local play flag (no device, no source)
    ToggleLocal,

    /// Nothing to play
    Nothing,
}

/// Decide what a play/pause press does
///
/// - remote and playing: pause
/// - remote and paused: play the device's track from the device position
/// - local with a source: play that source from the start
/// - local without a source: flip the local flag
pub fn plan_toggle(provenance: &Provenance) -> ToggleAction {
    match provenance {
        Provenance::Remote(remote) if remote.is_playing => ToggleAction::Pause,
        Provenance::Remote(remote) => match remote.track.source_uri() {
            Some(uri) => ToggleAction::Play {
                uri: uri.to_string(),
                position_ms: remote.position_ms,
            },
            None => ToggleAction::Nothing,
        },
        Provenance::Local(local) => match local.track.source_uri() {
            Some(uri) => ToggleAction::Play {
                uri: uri.to_string(),
                position_ms: 0,
            },
            None => ToggleAction::ToggleLocal,
        },
        Provenance::Empty => ToggleAction::Nothing,
    }
}

/// Convert a 0-100 progress request into an absolute position
///
/// Returns `None` when the duration is unknown.
pub fn seek_position_ms(percent: f64, duration_ms: u64) -> Option<u64> {
    if duration_ms == 0 || percent.is_nan() {
        return None;
    }
    let fraction = percent.clamp(0.0, 100.0) / 100.0;
    Some((fraction * duration_ms as f64).round() as u64)
}

/// Application-level player store
pub struct PlayerController {
    bridge: PlaybackBridge,
    queue: QueueStore,
    volume: VolumeControl,
}

impl PlayerController {
    /// Create a controller around a bridge
    ///
    /// The volume cache starts at the bridge's configured device volume.
    pub fn new(bridge: PlaybackBridge) -> Self {
        let volume = VolumeControl::from_device_level(bridge.config().initial_volume);
        Self {
            bridge,
            queue: QueueStore::new(),
            volume,
        }
    }

    // ===== Accessors =====

    /// The bridge
    pub fn bridge(&self) -> &PlaybackBridge {
        &self.bridge
    }

    /// The bridge, mutably (initialize, teardown, token updates)
    pub fn bridge_mut(&mut self) -> &mut PlaybackBridge {
        &mut self.bridge
    }

    /// The local queue store
    pub fn queue(&self) -> &QueueStore {
        &self.queue
    }

    /// The volume cache
    pub fn volume(&self) -> &VolumeControl {
        &self.volume
    }

    // ===== Derived state =====

    /// Apply pending device events
    pub fn sync(&mut self) -> usize {
        self.bridge.pump_events()
    }

    /// Current provenance
    pub fn provenance(&self) -> Provenance {
        let snapshot = self.bridge.snapshot();
        reconcile(snapshot.as_ref(), self.bridge.is_ready(), &self.queue)
    }

    /// Player bar model (`None` hides the bar)
    pub fn display(&self) -> Option<PlayerDisplay> {
        PlayerDisplay::build(&self.provenance(), &self.volume, self.bridge.is_ready())
    }

    /// Flattened playback state
    pub fn playback_state(&self) -> PlaybackState {
        PlaybackState::from_provenance(
            &self.provenance(),
            self.volume.device_level(),
            self.bridge.is_ready(),
        )
    }

    /// Error banner text
    pub fn error_message(&self) -> Option<String> {
        self.bridge.error_message()
    }

    // ===== Intents =====

    /// Play/pause button
    pub async fn toggle_play_pause(&mut self) -> Result<()> {
        let action = plan_toggle(&self.provenance());
        debug!(?action, "Play/pause pressed");

        match action {
            ToggleAction::Pause => self.bridge.pause().await,
            ToggleAction::Play { uri, position_ms } => self.bridge.play(&uri, position_ms).await,
            ToggleAction::ToggleLocal => {
                self.queue.toggle_playing();
                Ok(())
            }
            ToggleAction::Nothing => Ok(()),
        }
    }

    /// Progress bar drag, 0-100
    ///
    /// Returns the absolute position sent to the device, or `None` when the
    /// active track has no known duration.
    pub async fn seek_to_percent(&mut self, percent: f64) -> Result<Option<u64>> {
        let Some(position_ms) = seek_position_ms(percent, self.provenance().duration_ms()) else {
            debug!(percent, "Seek ignored: no duration");
            return Ok(None);
        };

        self.bridge.seek(position_ms).await?;
        Ok(Some(position_ms))
    }

    /// Volume slider, 0-100
    ///
    /// The cache always updates; the device is only called when connected.
    pub async fn set_volume_percent(&mut self, level: u8) -> Result<()> {
        let device_level = self.volume.set_level(level);
        self.forward_volume(device_level).await
    }

    /// Mute button
    pub async fn toggle_mute(&mut self) -> Result<()> {
        let device_level = self.volume.toggle_mute();
        self.forward_volume(device_level).await
    }

    async fn forward_volume(&mut self, device_level: f32) -> Result<()> {
        if self.bridge.is_connected() {
            self.bridge.set_volume(device_level).await
        } else {
            Ok(())
        }
    }

    /// Skip buttons
    ///
    /// A ready device skips remotely; otherwise the local queue advances.
    pub async fn skip(&mut self, direction: Direction) -> Result<()> {
        if self.bridge.is_ready() {
            return match direction {
                Direction::Next => self.bridge.skip_next().await,
                Direction::Previous => self.bridge.skip_previous().await,
            };
        }

        if self.queue.advance(direction).is_none() {
            debug!(?direction, "Already at queue boundary");
        }
        Ok(())
    }

    /// Track click
    ///
    /// Selects locally; a ready device also starts the track's source.
    pub async fn select_track(&mut self, track: Track) -> Result<()> {
        let source = track.source_uri().map(str::to_string);
        self.queue.select_track(track);
        self.start_on_device(source).await
    }

    /// "Play" on a collection page
    ///
    /// Rebuilds the queue from the collection and starts at `start` (or the
    /// first track).
    pub async fn play_collection(&mut self, collection: &Collection, start: Option<&Track>) -> Result<()> {
        let Some(track) = views::play_collection(&mut self.queue, collection, start) else {
            return Ok(());
        };
        let source = track.source_uri().map(str::to_string);
        self.start_on_device(source).await
    }

    async fn start_on_device(&mut self, source: Option<String>) -> Result<()> {
        match source {
            Some(uri) if self.bridge.is_ready() => self.bridge.play(&uri, 0).await,
            _ => Ok(()),
        }
    }
}
