/// Collection domain type
use serde::{Deserialize, Serialize};

use crate::types::Track;

/// Which page a collection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    /// Home page shelves
    Home,
    /// Search results
    Search,
    /// User library
    Library,
    /// A playlist
    Playlist,
    /// Liked songs
    Liked,
}

/// An ordered, titled group of tracks rendered by a page view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique identifier
    pub id: String,

    /// Page the collection is shown on
    pub kind: CollectionKind,

    /// Display title
    pub title: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Cover image
    #[serde(default)]
    pub artwork_url: String,

    /// Who created it
    #[serde(default)]
    pub owner: String,

    /// Tracks in display order
    pub tracks: Vec<Track>,
}

impl Collection {
    /// Create an empty collection
    pub fn new(id: impl Into<String>, kind: CollectionKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: String::new(),
            artwork_url: String::new(),
            owner: String::new(),
            tracks: Vec::new(),
        }
    }

    /// Replace the tracks
    #[must_use]
    pub fn with_tracks(mut self, tracks: Vec<Track>) -> Self {
        self.tracks = tracks;
        self
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the collection has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Sum of track durations in milliseconds
    pub fn total_duration_ms(&self) -> u64 {
        self.tracks.iter().map(Track::duration_ms).sum()
    }

    /// Position of a track by id
    pub fn position_of(&self, track_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id() == track_id)
    }
}
