//! Authentication endpoints of the Groove backend.

use crate::error::{ClientError, Result};
use crate::response;
use crate::types::{AuthUrlResponse, RefreshRequest, RefreshResponse, TokenResponse};
use groove_core::UserProfile;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Authentication client for the Groove backend.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Get the provider authorization URL to send the user to.
    pub async fn login_url(&self) -> Result<String> {
        let url = format!("{}/api/auth/login", self.base_url);
        debug!(url = %url, "Requesting authorization URL");

        let response = response::send(self.http.get(&url)).await?;
        let body: AuthUrlResponse = response::parse(response, "authorization URL").await?;
        Ok(body.auth_url)
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        let url = format!("{}/api/auth/callback", self.base_url);
        debug!(url = %url, "Exchanging authorization code");

        let response = response::send(self.http.get(&url).query(&[("code", code)])).await?;
        let tokens: TokenResponse = response::parse(response, "token response").await?;

        info!(expires_in = tokens.expires_in, "Obtained access token");
        Ok(tokens)
    }

    /// Obtain a new access token from a refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse> {
        let url = format!("{}/api/auth/refresh", self.base_url);
        debug!(url = %url, "Refreshing access token");

        let request = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        let response = response::send(self.http.post(&url).json(&request)).await?;

        match response::parse::<RefreshResponse>(response, "refresh response").await {
            Ok(refreshed) => {
                debug!(expires_in = refreshed.expires_in, "Token refresh successful");
                Ok(refreshed)
            }
            Err(ClientError::AuthRequired) => {
                warn!("Token refresh failed: refresh token expired or invalid");
                Err(ClientError::TokenRefreshFailed(
                    "Refresh token expired or invalid".to_string(),
                ))
            }
            Err(ClientError::ServerError { status, message }) => {
                warn!(status, error = %message, "Token refresh failed");
                Err(ClientError::TokenRefreshFailed(message))
            }
            Err(e) => Err(e),
        }
    }

    /// Get the signed-in user's profile.
    pub async fn profile(&self, access_token: &str) -> Result<UserProfile> {
        let url = format!("{}/api/user/profile", self.base_url);
        debug!(url = %url, "Fetching user profile");

        let response = response::send(self.http.get(&url).bearer_auth(access_token)).await?;
        let profile: UserProfile = response::parse(response, "user profile").await?;

        info!(
            user_id = %profile.id,
            product = %profile.product,
            is_premium = profile.is_premium,
            "Fetched user profile"
        );
        Ok(profile)
    }

    /// Check whether an access token is still accepted.
    pub async fn validate_token(&self, access_token: &str) -> Result<bool> {
        match self.profile(access_token).await {
            Ok(_) => Ok(true),
            Err(ClientError::AuthRequired) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
