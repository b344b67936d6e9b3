//! Page and list view models
//!
//! Pages (home, search, library, playlist, liked) render a `Collection` as a
//! list of rows and hand user clicks back to the queue store.

use groove_core::{Collection, Track};
use serde::Serialize;

use crate::queue::QueueStore;

/// One row in a track list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackRow {
    /// 1-based position
    pub position: usize,
    /// Track id
    pub id: String,
    /// Title
    pub title: String,
    /// Artist
    pub artist: String,
    /// Album
    pub album: String,
    /// `m:ss`
    pub duration_label: String,
    /// Cover art
    pub artwork_url: String,
    /// Row is the selected track
    pub is_current: bool,
    /// Row is the selected track and the local flag says playing
    pub is_playing: bool,
}

/// Rows for a collection, highlighting the store's current track
pub fn track_rows(collection: &Collection, store: &QueueStore) -> Vec<TrackRow> {
    let current_id = store.current().map(Track::id);

    collection
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_current = current_id == Some(track.id());
            TrackRow {
                position: i + 1,
                id: track.id().to_string(),
                title: track.title().to_string(),
                artist: track.artist().to_string(),
                album: track.album().to_string(),
                duration_label: track.duration_label(),
                artwork_url: track.artwork_url().to_string(),
                is_current,
                is_playing: is_current && store.is_playing(),
            }
        })
        .collect()
}

/// Queue a whole collection and select `start` (or its first track)
///
/// Returns the selected track. An empty collection leaves the store untouched.
pub fn play_collection<'a>(
    store: &'a mut QueueStore,
    collection: &Collection,
    start: Option<&Track>,
) -> Option<&'a Track> {
    let track = start.or_else(|| collection.tracks.first())?.clone();

    store.replace_queue(collection.tracks.clone());
    store.select_track(track);
    store.current()
}

/// Top-level screen routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Session still restoring
    Loading,
    /// No credential
    Login,
    /// Signed in on a free account
    PremiumRequired,
    /// Sidebar, pages and player bar
    Main,
}

impl Screen {
    /// Pick the screen for the session status
    pub fn resolve(is_loading: bool, is_authenticated: bool, is_premium: bool) -> Self {
        if is_loading {
            Self::Loading
        } else if !is_authenticated {
            Self::Login
        } else if !is_premium {
            Self::PremiumRequired
        } else {
            Self::Main
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groove_core::CollectionKind;

    fn playlist() -> Collection {
        Collection::new("p1", CollectionKind::Playlist, "Focus").with_tracks(vec![
            Track::from_label("a", "Intro", "Band", "LP", "1:05"),
            Track::from_label("b", "Middle", "Band", "LP", "3:45"),
            Track::from_label("c", "Outro", "Band", "LP", "2:00"),
        ])
    }

    #[test]
    fn rows_are_numbered_from_one() {
        let rows = track_rows(&playlist(), &QueueStore::new());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[1].duration_label, "3:45");
        assert!(rows.iter().all(|r| !r.is_current && !r.is_playing));
    }

    #[test]
    fn rows_highlight_current_track() {
        let collection = playlist();
        let mut store = QueueStore::new();
        store.select_track(collection.tracks[1].clone());

        let rows = track_rows(&collection, &store);
        assert!(rows[1].is_current);
        assert!(rows[1].is_playing);

        store.toggle_playing();
        let rows = track_rows(&collection, &store);
        assert!(rows[1].is_current);
        assert!(!rows[1].is_playing);
    }

    #[test]
    fn play_collection_from_middle() {
        let collection = playlist();
        let mut store = QueueStore::new();

        let selected = play_collection(&mut store, &collection, Some(&collection.tracks[1])).cloned();

        assert_eq!(selected.unwrap().id(), "b");
        assert_eq!(store.len(), 3);
        assert_eq!(store.index(), 1);
        assert!(store.is_playing());
    }

    #[test]
    fn play_collection_defaults_to_first_track() {
        let collection = playlist();
        let mut store = QueueStore::new();
        store.select_track(Track::new("x", "Other", "Other", "Other", 1_000));

        play_collection(&mut store, &collection, None);

        assert_eq!(store.current().unwrap().id(), "a");
        assert_eq!(store.index(), 0);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn play_empty_collection_changes_nothing() {
        let mut store = QueueStore::new();
        store.select_track(Track::new("x", "Other", "Other", "Other", 1_000));

        let empty = Collection::new("e", CollectionKind::Liked, "Liked Songs");
        assert!(play_collection(&mut store, &empty, None).is_none());
        assert_eq!(store.current().unwrap().id(), "x");
    }

    #[test]
    fn screen_routing() {
        assert_eq!(Screen::resolve(true, true, true), Screen::Loading);
        assert_eq!(Screen::resolve(false, false, true), Screen::Login);
        assert_eq!(Screen::resolve(false, true, false), Screen::PremiumRequired);
        assert_eq!(Screen::resolve(false, true, true), Screen::Main);
    }
}
