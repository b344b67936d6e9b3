/// Track domain type
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::time::{format_time, parse_duration_label};

/// A playable item.
///
/// Tracks are created by data sources (fixtures or the remote catalog) and are
/// never mutated afterwards; fields are only reachable through getters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    id: String,
    title: String,
    artist: String,
    album: String,
    duration_ms: u64,
    #[serde(default)]
    artwork_url: String,
    #[serde(default)]
    source_uri: Option<String>,
}

impl Track {
    /// Create a track with the required metadata
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            duration_ms,
            artwork_url: String::new(),
            source_uri: None,
        }
    }

    /// Create a track whose duration is given as an `m:ss` label
    ///
    /// Unparseable labels yield a duration of zero, which the player treats as unknown.
    pub fn from_label(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        duration_label: &str,
    ) -> Self {
        let duration_ms = parse_duration_label(duration_label).unwrap_or(0);
        Self::new(id, title, artist, album, duration_ms)
    }

    /// Attach artwork
    #[must_use]
    pub fn with_artwork(mut self, url: impl Into<String>) -> Self {
        self.artwork_url = url.into();
        self
    }

    /// Attach a playable source
    #[must_use]
    pub fn with_source_uri(mut self, uri: impl Into<String>) -> Self {
        self.source_uri = Some(uri.into());
        self
    }

    /// Unique identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Track title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Artist display name
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Album name
    pub fn album(&self) -> &str {
        &self.album
    }

    /// Duration in milliseconds (0 when unknown)
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Duration as a `Duration`
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// `m:ss` label for list rows
    pub fn duration_label(&self) -> String {
        format_time(self.duration_ms)
    }

    /// Artwork URL (may be empty)
    pub fn artwork_url(&self) -> &str {
        &self.artwork_url
    }

    /// Playable source, if any
    pub fn source_uri(&self) -> Option<&str> {
        self.source_uri.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_creation() {
        let track = Track::new("1", "Song", "Artist", "Album", 180_000)
            .with_artwork("https://img.example/1.jpg")
            .with_source_uri("spotify:track:1");

        assert_eq!(track.id(), "1");
        assert_eq!(track.title(), "Song");
        assert_eq!(track.duration(), Duration::from_secs(180));
        assert_eq!(track.artwork_url(), "https://img.example/1.jpg");
        assert_eq!(track.source_uri(), Some("spotify:track:1"));
    }

    #[test]
    fn from_label_parses_duration() {
        let track = Track::from_label("1", "Song", "Artist", "Album", "3:45");
        assert_eq!(track.duration_ms(), 225_000);
        assert_eq!(track.duration_label(), "3:45");
        assert!(track.source_uri().is_none());
    }

    #[test]
    fn from_label_with_garbage_is_unknown_duration() {
        let track = Track::from_label("1", "Song", "Artist", "Album", "soon");
        assert_eq!(track.duration_ms(), 0);

        let huge = Track::from_label("2", "Song", "Artist", "Album", "999999999999999999:00");
        assert_eq!(huge.duration_ms(), 0);
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let track: Track = serde_json::from_str(
            r#"{"id":"1","title":"T","artist":"A","album":"B","duration_ms":1000}"#,
        )
        .unwrap();
        assert_eq!(track.artwork_url(), "");
        assert!(track.source_uri().is_none());
    }
}
