//! Error types for playback management

use groove_core::CoreError;
use thiserror::Error;

/// Playback errors
///
/// `Display` is the short user-facing message stored in the bridge's error slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Device reported an initialization failure
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Device rejected the credential
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Account cannot use the device (e.g. not premium)
    #[error("Account error: {0}")]
    Account(String),

    /// Device failed to play an item
    #[error("Playback error: {0}")]
    Playback(String),

    /// Device connection refused
    #[error("Failed to connect to the playback device")]
    ConnectFailed,

    /// Device never reported readiness
    #[error("Timed out waiting for the playback device")]
    ReadyTimeout,

    /// No device identifier or no connected device
    #[error("Player not ready")]
    NotReady,

    /// No credential for a transport request
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Transport request rejected or backend unreachable
    #[error("{0}")]
    Transport(String),

    /// Direct device call failed
    #[error("{0}")]
    Device(String),
}

impl PlaybackError {
    /// Convert a failed transport request into a user-facing error
    ///
    /// Backend rejections carry their own detail; anything else falls back to `action`.
    pub fn transport(action: &str, err: &CoreError) -> Self {
        match err {
            CoreError::AuthRequired => Self::NotAuthenticated,
            CoreError::Rejected(detail) if !detail.is_empty() => Self::Transport(detail.clone()),
            _ => Self::Transport(action.to_string()),
        }
    }

    /// Convert a failed device call into a user-facing error
    pub fn device(action: &str) -> Self {
        Self::Device(action.to_string())
    }

    /// Message for the error slot
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Whether the error came from the device's own error events
    pub fn is_device_reported(&self) -> bool {
        matches!(
            self,
            Self::Initialization(_) | Self::Authentication(_) | Self::Account(_) | Self::Playback(_)
        )
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_prefers_backend_detail() {
        let err = PlaybackError::transport("Error playing track", &CoreError::rejected("Device not found"));
        assert_eq!(err.user_message(), "Device not found");
    }

    #[test]
    fn transport_falls_back_to_action() {
        let err = PlaybackError::transport("Error pausing track", &CoreError::network("connection reset"));
        assert_eq!(err.user_message(), "Error pausing track");

        let err = PlaybackError::transport("Error playing track", &CoreError::rejected(""));
        assert_eq!(err.user_message(), "Error playing track");
    }

    #[test]
    fn expired_credential_is_an_auth_failure() {
        let err = PlaybackError::transport("Error playing track", &CoreError::AuthRequired);
        assert_eq!(err, PlaybackError::NotAuthenticated);
    }

    #[test]
    fn device_errors_keep_sdk_prefixes() {
        let err = PlaybackError::Account("premium required".into());
        assert_eq!(err.user_message(), "Account error: premium required");
        assert!(err.is_device_reported());
        assert!(!PlaybackError::NotReady.is_device_reported());
    }
}
