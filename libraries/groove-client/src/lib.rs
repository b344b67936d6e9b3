//! Groove Backend Client
//!
//! HTTP client library for the Groove backend, which relays auth, catalog and
//! playback calls to the streaming provider.
//!
//! # Features
//!
//! - **Authentication**: Authorization-code login, token refresh, profile
//! - **Catalog**: Track/artist/playlist search, including the search page's
//!   concurrent three-way search
//! - **Playback**: Play/pause relay, playback state, device list
//! - **Session**: Token persistence with one refresh attempt on expiry
//!
//! `GrooveClient` implements `groove_core::Transport`, so it can be handed
//! straight to the playback bridge.
//!
//! # Example
//!
//! ```ignore
//! use groove_client::{AuthSession, ClientConfig, FileTokenStore, GrooveClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GrooveClient::new(ClientConfig::new("http://localhost:8001"))?;
//!     let store = Arc::new(FileTokenStore::new("tokens.json"));
//!
//!     let mut session = AuthSession::new(client, store);
//!     if !session.restore().await? {
//!         println!("Sign in at {}", session.login_url().await?);
//!         return Ok(());
//!     }
//!
//!     let results = session
//!         .with_auto_refresh(|client, token| async move {
//!             client.catalog(&token).search_all("daft punk").await
//!         })
//!         .await?;
//!     println!("Found {} tracks", results.tracks.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod catalog;
mod client;
mod error;
mod playback;
mod response;
mod session;
mod store;
mod types;

// Re-export main types
pub use client::GrooveClient;
pub use error::{ClientError, Result};
pub use session::AuthSession;
pub use store::{FileTokenStore, MemoryTokenStore};
pub use types::{
    ArtistRef, AuthUrlResponse, CatalogAlbum, CatalogArtist, CatalogPlaylist, CatalogTrack,
    ClientConfig, Device, DevicesResponse, Followers, HealthResponse, Page, PauseResponse,
    PlayResponse, PlaybackStatus, PlaylistOwner, RefreshResponse, SearchResponse, SearchResults,
    SearchType, TokenResponse,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use catalog::{CatalogClient, ARTIST_SEARCH_LIMIT, PLAYLIST_SEARCH_LIMIT, TRACK_SEARCH_LIMIT};
pub use playback::PlaybackClient;
