//! Main Groove backend client.

use crate::auth::AuthClient;
use crate::catalog::CatalogClient;
use crate::error::{ClientError, Result};
use crate::playback::PlaybackClient;
use crate::response;
use crate::types::{ClientConfig, HealthResponse};
use async_trait::async_trait;
use groove_core::{PlayRequest, Transport};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// Client for the Groove backend.
///
/// Holds no credentials: every authenticated call takes the access token, so
/// the session that owns the tokens decides when to refresh them.
///
/// # Example
///
/// ```ignore
/// use groove_client::{ClientConfig, GrooveClient};
///
/// let client = GrooveClient::new(ClientConfig::new("http://localhost:8001"))?;
/// client.health().await?;
///
/// let results = client.catalog(&token).search_all("daft punk").await?;
/// println!("{} tracks", results.tracks.len());
/// ```
#[derive(Clone)]
pub struct GrooveClient {
    http: Client,
    base_url: String,
}

impl GrooveClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = normalize_url(&config.url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("Groove/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Backend base URL, without a trailing slash.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Check that the backend is up.
    ///
    /// This does not require authentication.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/api/health", self.base_url);
        debug!(url = %url, "Checking backend health");

        let response = response::send(self.http.get(&url)).await?;
        let health: HealthResponse = response::parse(response, "health response").await?;

        info!(status = %health.status, "Backend reachable");
        Ok(health)
    }

    /// Authentication endpoints.
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url)
    }

    /// Catalog endpoints, authorized with `access_token`.
    pub fn catalog<'a>(&'a self, access_token: &'a str) -> CatalogClient<'a> {
        CatalogClient::new(&self.http, &self.base_url, access_token)
    }

    /// Playback endpoints, authorized with `access_token`.
    pub fn playback<'a>(&'a self, access_token: &'a str) -> PlaybackClient<'a> {
        PlaybackClient::new(&self.http, &self.base_url, access_token)
    }
}

#[async_trait]
impl Transport for GrooveClient {
    async fn play(&self, access_token: &str, request: PlayRequest) -> groove_core::Result<()> {
        self.playback(access_token).play(&request).await?;
        Ok(())
    }

    async fn pause(&self, access_token: &str, device_id: &str) -> groove_core::Result<()> {
        self.playback(access_token).pause(Some(device_id)).await?;
        Ok(())
    }
}

fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = trimmed.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    let parsed = Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
    if parsed.host_str().is_none() {
        return Err(ClientError::InvalidUrl("URL must include a host".into()));
    }

    Ok(url)
}
