//! Types for Groove backend API requests and responses.

use std::time::Duration;

use groove_core::{Collection, CollectionKind, Image, Track};
use serde::{Deserialize, Deserializer, Serialize};

/// Configuration for connecting to the Groove backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:8001")
    pub url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Create a config with default timeouts (30s request, 10s connect).
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Response from the health endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Response from the login endpoint: where to send the user.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

/// Tokens returned by the authorization-code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Token validity in seconds
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

/// Request body for the refresh endpoint.
#[derive(Debug, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response from the refresh endpoint.
///
/// The refresh token is only present when the provider rotated it.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

// =============================================================================
// Catalog Types
// =============================================================================

/// What a search looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Track,
    Artist,
    Album,
    Playlist,
}

impl SearchType {
    /// Value of the `type` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Artist => "artist",
            Self::Album => "album",
            Self::Playlist => "playlist",
        }
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Items on this page (null entries dropped)
    #[serde(deserialize_with = "skip_nulls")]
    pub items: Vec<T>,
    /// Total matches across all pages
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

fn skip_nulls<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Vec<Option<T>> = Deserialize::deserialize(deserializer)?;
    Ok(items.into_iter().flatten().collect())
}

/// Raw search response, keyed by result type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<Page<CatalogTrack>>,
    #[serde(default)]
    pub artists: Option<Page<CatalogArtist>>,
    #[serde(default)]
    pub albums: Option<Page<CatalogAlbum>>,
    #[serde(default)]
    pub playlists: Option<Page<CatalogPlaylist>>,
}

/// Artist credit on a catalog track or album.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// Album as embedded in catalog results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogAlbum {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    /// Covers, largest first
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Track from the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogTrack {
    pub id: String,
    pub name: String,
    /// Playable URI
    pub uri: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: CatalogAlbum,
    #[serde(default)]
    pub preview_url: Option<String>,
}

impl CatalogTrack {
    /// Convert into the shared track model (first artist, first cover).
    pub fn to_track(&self) -> Track {
        let artist = self.artists.first().map(|a| a.name.as_str()).unwrap_or_default();
        let mut track = Track::new(&self.id, &self.name, artist, &self.album.name, self.duration_ms)
            .with_source_uri(&self.uri);
        if let Some(image) = self.album.images.first() {
            track = track.with_artwork(&image.url);
        }
        track
    }
}

/// Follower count wrapper.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

/// Artist from the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub followers: Followers,
}

/// Playlist owner.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistOwner {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Playlist from the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub owner: PlaylistOwner,
}

impl CatalogPlaylist {
    /// Convert into an (empty) collection for page views.
    pub fn to_collection(&self) -> Collection {
        let mut collection = Collection::new(&self.id, CollectionKind::Playlist, &self.name);
        collection.description = self.description.clone().unwrap_or_default();
        collection.artwork_url = self.images.first().map(|i| i.url.clone()).unwrap_or_default();
        collection.owner = self
            .owner
            .display_name
            .clone()
            .unwrap_or_else(|| self.owner.id.clone());
        collection
    }
}

/// Combined results of the search page.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub tracks: Vec<Track>,
    pub artists: Vec<CatalogArtist>,
    pub playlists: Vec<CatalogPlaylist>,
}

impl SearchResults {
    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.artists.is_empty() && self.playlists.is_empty()
    }

    /// Track results as a collection for the search page.
    pub fn track_collection(&self, query: &str) -> Collection {
        Collection::new(format!("search:{}", query), CollectionKind::Search, query)
            .with_tracks(self.tracks.clone())
    }
}

// =============================================================================
// Playback Types
// =============================================================================

/// Response from the play endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayResponse {
    pub status: String,
    #[serde(default)]
    pub position_ms: u64,
    #[serde(default)]
    pub track_uri: String,
}

/// Request body for the pause endpoint.
#[derive(Debug, Serialize)]
pub struct PauseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

/// Response from the pause endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PauseResponse {
    pub status: String,
}

/// Playback device known to the account.
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, rename = "type")]
    pub device_type: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub volume_percent: Option<u8>,
}

/// Response from the devices endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Account-wide playback state.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackStatus {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub item: Option<CatalogTrack>,
    #[serde(default)]
    pub device: Option<Device>,
    #[serde(default)]
    pub shuffle_state: bool,
    #[serde(default)]
    pub repeat_state: Option<String>,
}

impl PlaybackStatus {
    /// Track being played, in the shared model.
    pub fn track(&self) -> Option<Track> {
        self.item.as_ref().map(CatalogTrack::to_track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_drops_null_playlists() {
        let json = r#"{
            "playlists": {"items": [null, {"id": "p1", "name": "Chill", "owner": {"id": "u1"}}], "total": 2}
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        let playlists = response.playlists.unwrap();
        assert_eq!(playlists.items.len(), 1);
        assert_eq!(playlists.total, 2);
        assert_eq!(playlists.items[0].to_collection().owner, "u1");
        assert!(response.tracks.is_none());
    }

    #[test]
    fn catalog_track_uses_first_artist_and_cover() {
        let json = r#"{
            "id": "t1",
            "name": "Song",
            "uri": "spotify:track:t1",
            "duration_ms": 225000,
            "artists": [{"name": "Lead"}, {"name": "Feature"}],
            "album": {"name": "LP", "images": [{"url": "https://img/640.jpg", "height": 640, "width": 640}, {"url": "https://img/64.jpg"}]}
        }"#;
        let track: CatalogTrack = serde_json::from_str(json).unwrap();
        let track = track.to_track();

        assert_eq!(track.artist(), "Lead");
        assert_eq!(track.artwork_url(), "https://img/640.jpg");
        assert_eq!(track.duration_label(), "3:45");
        assert_eq!(track.source_uri(), Some("spotify:track:t1"));
    }

    #[test]
    fn refresh_response_defaults() {
        let response: RefreshResponse = serde_json::from_str(r#"{"access_token": "new"}"#).unwrap();
        assert_eq!(response.expires_in, 3600);
        assert!(response.refresh_token.is_none());
    }

    #[test]
    fn pause_request_omits_missing_device() {
        let body = serde_json::to_string(&PauseRequest { device_id: None }).unwrap();
        assert_eq!(body, "{}");
    }
}
