//! Error types for the Groove backend client.

use groove_core::CoreError;
use thiserror::Error;

/// Errors that can occur when talking to the Groove backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// No credential, or the credential was rejected
    #[error("Authentication required")]
    AuthRequired,

    /// Token refresh failed
    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),

    /// Invalid backend URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse backend response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Backend is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Token storage failed
    #[error("Token storage failed: {0}")]
    Storage(#[from] CoreError),
}

impl ClientError {
    /// Map a send failure, separating "cannot reach the backend" from the rest.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ServerUnreachable(err.to_string())
        } else {
            Self::Request(err)
        }
    }

    /// Whether retrying with a fresh access token could help.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthRequired | Self::TokenRefreshFailed(_))
    }
}

impl From<ClientError> for CoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::AuthRequired => CoreError::AuthRequired,
            ClientError::ServerError { message, .. } => CoreError::Rejected(message),
            ClientError::ServerUnreachable(msg) => CoreError::Network(msg),
            ClientError::Request(e) => CoreError::Network(e.to_string()),
            ClientError::Storage(e) => e,
            other => CoreError::Rejected(other.to_string()),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
