//! Playback control endpoints of the Groove backend.

use crate::error::Result;
use crate::response;
use crate::types::{Device, DevicesResponse, PauseRequest, PauseResponse, PlayResponse, PlaybackStatus};
use groove_core::PlayRequest;
use reqwest::Client;
use tracing::{debug, info};

/// Playback client for the Groove backend.
pub struct PlaybackClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> PlaybackClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Start one item on a device.
    pub async fn play(&self, request: &PlayRequest) -> Result<PlayResponse> {
        let url = format!("{}/api/play", self.base_url);
        debug!(
            url = %url,
            track_uri = %request.track_uri,
            position_ms = request.position_ms,
            device_id = %request.device_id,
            "Requesting playback"
        );

        let response =
            response::send(self.http.post(&url).bearer_auth(self.access_token).json(request)).await?;
        let played: PlayResponse = response::parse(response, "play response").await?;

        info!(track_uri = %played.track_uri, position_ms = played.position_ms, "Playback started");
        Ok(played)
    }

    /// Pause a device (or the active one when `device_id` is `None`).
    pub async fn pause(&self, device_id: Option<&str>) -> Result<PauseResponse> {
        let url = format!("{}/api/pause", self.base_url);
        debug!(url = %url, device_id = ?device_id, "Requesting pause");

        let request = PauseRequest {
            device_id: device_id.map(str::to_string),
        };
        let response =
            response::send(self.http.post(&url).bearer_auth(self.access_token).json(&request)).await?;
        let paused: PauseResponse = response::parse(response, "pause response").await?;

        info!(status = %paused.status, "Playback paused");
        Ok(paused)
    }

    /// Current account-wide playback state (`None` when nothing is active).
    pub async fn state(&self) -> Result<Option<PlaybackStatus>> {
        let url = format!("{}/api/playback/state", self.base_url);
        debug!(url = %url, "Fetching playback state");

        let response = response::send(self.http.get(&url).bearer_auth(self.access_token)).await?;
        response::parse_optional(response, "playback state").await
    }

    /// Devices available to the account.
    pub async fn devices(&self) -> Result<Vec<Device>> {
        let url = format!("{}/api/devices", self.base_url);
        debug!(url = %url, "Fetching devices");

        let response = response::send(self.http.get(&url).bearer_auth(self.access_token)).await?;
        let devices: Option<DevicesResponse> = response::parse_optional(response, "device list").await?;
        let devices = devices.unwrap_or_default().devices;

        debug!(count = devices.len(), "Fetched devices");
        Ok(devices)
    }
}
