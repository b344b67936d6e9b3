//! Authentication session.
//!
//! Owns the access/refresh token pair and the signed-in profile, persists the
//! tokens through a `TokenStore`, and decides when to refresh.

use crate::client::GrooveClient;
use crate::error::{ClientError, Result};
use groove_core::{TokenStore, UserProfile, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Signed-in state.
pub struct AuthSession {
    client: GrooveClient,
    store: Arc<dyn TokenStore>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<UserProfile>,
    loading: bool,
}

impl AuthSession {
    /// Create a session; it reports `is_loading` until `restore` or
    /// `complete_login` finishes.
    pub fn new(client: GrooveClient, store: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            store,
            access_token: None,
            refresh_token: None,
            user: None,
            loading: true,
        }
    }

    /// Restore a stored session.
    ///
    /// Reads the stored tokens and fetches the profile. If that fails, one
    /// refresh is attempted and the profile fetched again; if that fails too
    /// the session is cleared. Returns whether a user is signed in.
    pub async fn restore(&mut self) -> Result<bool> {
        let stored = self.store.get(ACCESS_TOKEN_KEY).and_then(|access| {
            self.store
                .get(REFRESH_TOKEN_KEY)
                .map(|refresh| (access, refresh))
        });
        let (access, refresh) = match stored {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(error = %e, "Failed to read stored session");
                self.loading = false;
                return Err(e.into());
            }
        };
        self.access_token = access;
        self.refresh_token = refresh;

        let restored = match self.access_token.clone() {
            Some(token) => self.load_profile(&token).await.is_ok(),
            None => {
                debug!("No stored session");
                false
            }
        };

        self.loading = false;
        Ok(restored)
    }

    /// URL to send the user to for sign-in.
    pub async fn login_url(&self) -> Result<String> {
        self.client.auth().login_url().await
    }

    /// Finish sign-in with the authorization code from the callback.
    pub async fn complete_login(&mut self, code: &str) -> Result<&UserProfile> {
        let result = self.exchange_and_load(code).await;
        self.loading = false;
        result?;
        self.user.as_ref().ok_or(ClientError::AuthRequired)
    }

    async fn exchange_and_load(&mut self, code: &str) -> Result<()> {
        let tokens = self.client.auth().exchange_code(code).await?;

        self.store.set(ACCESS_TOKEN_KEY, &tokens.access_token)?;
        self.store.set(REFRESH_TOKEN_KEY, &tokens.refresh_token)?;
        self.access_token = Some(tokens.access_token.clone());
        self.refresh_token = Some(tokens.refresh_token);

        self.load_profile(&tokens.access_token).await
    }

    /// Fetch the profile; on failure refresh once and retry, then give up and
    /// clear the session.
    async fn load_profile(&mut self, token: &str) -> Result<()> {
        let first = match self.client.auth().profile(token).await {
            Ok(profile) => {
                self.user = Some(profile);
                return Ok(());
            }
            Err(e) => e,
        };

        warn!(error = %first, "Profile fetch failed, refreshing token");
        let token = self.refresh().await?;

        match self.client.auth().profile(&token).await {
            Ok(profile) => {
                self.user = Some(profile);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Profile fetch failed after refresh, signing out");
                self.logout()?;
                Err(e)
            }
        }
    }

    /// Get a new access token.
    ///
    /// Any failure clears the session, leaving `is_authenticated() == false`.
    pub async fn refresh(&mut self) -> Result<String> {
        let stored = match &self.refresh_token {
            Some(token) => Some(token.clone()),
            None => self.store.get(REFRESH_TOKEN_KEY)?,
        };

        let Some(refresh_token) = stored else {
            warn!("No refresh token, signing out");
            self.logout()?;
            return Err(ClientError::TokenRefreshFailed("No refresh token".into()));
        };

        match self.client.auth().refresh(&refresh_token).await {
            Ok(refreshed) => {
                self.store.set(ACCESS_TOKEN_KEY, &refreshed.access_token)?;
                if let Some(rotated) = &refreshed.refresh_token {
                    self.store.set(REFRESH_TOKEN_KEY, rotated)?;
                    self.refresh_token = Some(rotated.clone());
                }
                self.access_token = Some(refreshed.access_token.clone());
                info!(expires_in = refreshed.expires_in, "Access token refreshed");
                Ok(refreshed.access_token)
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed, signing out");
                self.logout()?;
                Err(match e {
                    ClientError::TokenRefreshFailed(_) => e,
                    other => ClientError::TokenRefreshFailed(other.to_string()),
                })
            }
        }
    }

    /// Run an authorized call, refreshing once if the token was rejected.
    pub async fn with_auto_refresh<T, F, Fut>(&mut self, operation: F) -> Result<T>
    where
        F: Fn(GrooveClient, String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let token = self.access_token.clone().ok_or(ClientError::AuthRequired)?;

        match operation(self.client.clone(), token).await {
            Err(ClientError::AuthRequired) => {
                warn!("Token expired, attempting refresh");
                let token = self.refresh().await?;
                operation(self.client.clone(), token).await
            }
            other => other,
        }
    }

    /// Sign out: forget tokens and profile, in memory and in storage.
    pub fn logout(&mut self) -> Result<()> {
        self.access_token = None;
        self.refresh_token = None;
        self.user = None;

        self.store.remove(ACCESS_TOKEN_KEY)?;
        self.store.remove(REFRESH_TOKEN_KEY)?;
        info!("Logged out");
        Ok(())
    }

    /// Session restore still in progress.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Both a token and a profile are present.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }

    /// Signed-in account can stream.
    pub fn is_premium(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_premium)
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn client(&self) -> &GrooveClient {
        &self.client
    }
}
