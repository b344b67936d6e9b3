//! Catalog search against the Groove backend.

use crate::error::Result;
use crate::response;
use crate::types::{CatalogTrack, SearchResponse, SearchResults, SearchType};
use groove_core::Track;
use reqwest::Client;
use tracing::debug;

/// Result limits used by the search page.
pub const TRACK_SEARCH_LIMIT: u32 = 10;
pub const ARTIST_SEARCH_LIMIT: u32 = 6;
pub const PLAYLIST_SEARCH_LIMIT: u32 = 6;

/// Catalog client for the Groove backend.
pub struct CatalogClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> CatalogClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Search the catalog for one result type.
    pub async fn search(&self, query: &str, kind: SearchType, limit: u32) -> Result<SearchResponse> {
        let url = format!("{}/api/search", self.base_url);
        debug!(url = %url, query = %query, kind = kind.as_str(), limit, "Searching catalog");

        let request = self
            .http
            .get(&url)
            .bearer_auth(self.access_token)
            .query(&[("q", query), ("type", kind.as_str())])
            .query(&[("limit", limit)]);

        let response = response::send(request).await?;
        response::parse(response, "search response").await
    }

    /// Search tracks, converted to the shared track model.
    pub async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        let response = self.search(query, SearchType::Track, limit).await?;
        Ok(response
            .tracks
            .map(|page| page.items.iter().map(CatalogTrack::to_track).collect())
            .unwrap_or_default())
    }

    /// Run the search page's three searches concurrently.
    ///
    /// Fails as a whole if any of them fails. A blank query returns empty
    /// results without touching the backend.
    pub async fn search_all(&self, query: &str) -> Result<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults::default());
        }

        let (tracks, artists, playlists) = tokio::try_join!(
            self.search_tracks(query, TRACK_SEARCH_LIMIT),
            self.search(query, SearchType::Artist, ARTIST_SEARCH_LIMIT),
            self.search(query, SearchType::Playlist, PLAYLIST_SEARCH_LIMIT),
        )?;

        let results = SearchResults {
            tracks,
            artists: artists.artists.map(|p| p.items).unwrap_or_default(),
            playlists: playlists.playlists.map(|p| p.items).unwrap_or_default(),
        };

        debug!(
            query = %query,
            tracks = results.tracks.len(),
            artists = results.artists.len(),
            playlists = results.playlists.len(),
            "Search complete"
        );
        Ok(results)
    }
}
