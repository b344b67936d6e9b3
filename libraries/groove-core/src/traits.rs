/// Collaborator traits for Groove
///
/// The playback layer depends on these seams instead of on the HTTP client,
/// so the bridge can be driven by a fake transport in tests.
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Storage key for the access token
pub const ACCESS_TOKEN_KEY: &str = "groove_access_token";

/// Storage key for the refresh token
pub const REFRESH_TOKEN_KEY: &str = "groove_refresh_token";

/// Body of a transport play request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRequest {
    /// Item to play
    pub track_uri: String,
    /// Start offset
    pub position_ms: u64,
    /// Target device
    pub device_id: String,
}

/// Play/pause relay through the backend collaborator
///
/// Transport commands need a bearer credential and a device identifier; the
/// remaining commands go to the device directly.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Start playback of one item on a device
    ///
    /// # Errors
    /// Returns an error if the request is rejected or the backend is unreachable
    async fn play(&self, access_token: &str, request: PlayRequest) -> Result<()>;

    /// Pause playback on a device
    ///
    /// # Errors
    /// Returns an error if the request is rejected or the backend is unreachable
    async fn pause(&self, access_token: &str, device_id: &str) -> Result<()>;
}

/// Key/value persistence for session tokens
///
/// Mirrors browser local storage: string keys, string values, synchronous.
pub trait TokenStore: Send + Sync {
    /// Read a value
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value (missing keys are not an error)
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written
    fn remove(&self, key: &str) -> Result<()>;
}
