//! Queue/selection store
//!
//! Holds the locally selected track, the ordered queue it came from, and a
//! local play flag. Nothing here talks to a device: without one, "playing" is
//! purely UI state.

use groove_core::Track;
use tracing::debug;

use crate::types::Direction;

/// Local queue and selection
///
/// Invariants:
/// - `index < queue.len()` whenever the queue is non-empty (0 otherwise)
/// - membership is by track id
#[derive(Debug, Clone, Default)]
pub struct QueueStore {
    /// Tracks eligible for sequential advancement
    queue: Vec<Track>,

    /// Position in `queue`
    index: usize,

    /// Selected track (may be absent from `queue` after a replace)
    current: Option<Track>,

    /// Local play flag
    is_playing: bool,
}

impl QueueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a track and mark it playing
    ///
    /// If the track is already queued the index jumps to it and the queue is
    /// left alone; otherwise the queue becomes `[track]`.
    pub fn select_track(&mut self, track: Track) {
        match self.position_of(track.id()) {
            Some(pos) => self.index = pos,
            None => {
                self.queue = vec![track.clone()];
                self.index = 0;
            }
        }

        debug!(track_id = %track.id(), index = self.index, "Selected track");
        self.current = Some(track);
        self.is_playing = true;
    }

    /// Replace the whole queue
    ///
    /// The index follows the current track when it is part of the new queue and
    /// resets to 0 otherwise. With no current track the first element is seeded.
    pub fn replace_queue(&mut self, tracks: Vec<Track>) {
        self.queue = tracks;

        self.index = self
            .current
            .as_ref()
            .and_then(|current| self.position_of(current.id()))
            .unwrap_or(0);

        if self.current.is_none() {
            self.current = self.queue.first().cloned();
        }

        debug!(len = self.queue.len(), index = self.index, "Replaced queue");
    }

    /// Move one step within the queue
    ///
    /// Returns the newly current track, or `None` (and changes nothing) at
    /// either end. Never wraps.
    pub fn advance(&mut self, direction: Direction) -> Option<&Track> {
        let target = match direction {
            Direction::Next if self.index + 1 < self.queue.len() => self.index + 1,
            Direction::Previous if self.index > 0 && !self.queue.is_empty() => self.index - 1,
            _ => return None,
        };

        self.index = target;
        self.current = Some(self.queue[target].clone());
        self.current.as_ref()
    }

    /// Flip the local play flag (only meaningful with a current track)
    pub fn toggle_playing(&mut self) -> bool {
        if self.current.is_some() {
            self.is_playing = !self.is_playing;
        }
        self.is_playing
    }

    /// Set the local play flag
    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing && self.current.is_some();
    }

    /// Selected track
    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Queue contents in order
    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    /// Current position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Local play flag
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued tracks
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    fn position_of(&self, track_id: &str) -> Option<usize> {
        self.queue.iter().position(|t| t.id() == track_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track::new(id, format!("Track {}", id), "Test Artist", "Test Album", 180_000)
    }

    fn tracks(ids: &[&str]) -> Vec<Track> {
        ids.iter().map(|id| track(id)).collect()
    }

    #[test]
    fn empty_store_has_no_current_track() {
        let store = QueueStore::new();
        assert!(store.current().is_none());
        assert!(store.is_empty());
        assert!(!store.is_playing());
    }

    #[test]
    fn select_unqueued_track_makes_singleton_queue() {
        let mut store = QueueStore::new();
        store.replace_queue(tracks(&["1", "2", "3"]));

        store.select_track(track("9"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.queue()[0].id(), "9");
        assert_eq!(store.index(), 0);
        assert_eq!(store.current().unwrap().id(), "9");
        assert!(store.is_playing());
    }

    #[test]
    fn select_queued_track_jumps_index() {
        let mut store = QueueStore::new();
        store.replace_queue(tracks(&["1", "2", "3"]));

        store.select_track(track("3"));

        assert_eq!(store.index(), 2);
        assert_eq!(store.len(), 3);
        assert_eq!(store.current().unwrap().id(), "3");
    }

    #[test]
    fn replace_seeds_first_track_when_nothing_selected() {
        let mut store = QueueStore::new();
        store.replace_queue(tracks(&["a", "b"]));

        assert_eq!(store.current().unwrap().id(), "a");
        assert_eq!(store.index(), 0);
        // Seeding does not start playback
        assert!(!store.is_playing());
    }

    #[test]
    fn replace_keeps_index_on_current_track() {
        let mut store = QueueStore::new();
        store.select_track(track("b"));

        store.replace_queue(tracks(&["a", "b", "c"]));

        assert_eq!(store.index(), 1);
        assert_eq!(store.current().unwrap().id(), "b");
    }

    #[test]
    fn replace_resets_index_when_current_not_queued() {
        let mut store = QueueStore::new();
        store.replace_queue(tracks(&["a", "b", "c"]));
        store.select_track(track("c"));

        store.replace_queue(tracks(&["x", "y"]));

        assert_eq!(store.index(), 0);
        // Current selection survives a replace
        assert_eq!(store.current().unwrap().id(), "c");
    }

    #[test]
    fn replace_with_empty_queue() {
        let mut store = QueueStore::new();
        store.replace_queue(Vec::new());
        assert!(store.current().is_none());
        assert_eq!(store.index(), 0);
    }

    #[test]
    fn advance_moves_within_bounds() {
        let mut store = QueueStore::new();
        store.replace_queue(tracks(&["1", "2", "3"]));

        assert_eq!(store.advance(Direction::Next).unwrap().id(), "2");
        assert_eq!(store.advance(Direction::Next).unwrap().id(), "3");
        assert!(store.advance(Direction::Next).is_none());
        assert_eq!(store.index(), 2);

        assert_eq!(store.advance(Direction::Previous).unwrap().id(), "2");
        assert_eq!(store.advance(Direction::Previous).unwrap().id(), "1");
        assert!(store.advance(Direction::Previous).is_none());
        assert_eq!(store.index(), 0);
        assert_eq!(store.current().unwrap().id(), "1");
    }

    #[test]
    fn advance_on_empty_queue_is_noop() {
        let mut store = QueueStore::new();
        assert!(store.advance(Direction::Next).is_none());
        assert!(store.advance(Direction::Previous).is_none());
        assert_eq!(store.index(), 0);
    }

    #[test]
    fn toggle_playing_requires_selection() {
        let mut store = QueueStore::new();
        assert!(!store.toggle_playing());

        store.select_track(track("1"));
        assert!(!store.toggle_playing());
        assert!(store.toggle_playing());
    }
}
