/// User profile domain type
use serde::{Deserialize, Serialize};

/// Profile image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL
    pub url: String,
    /// Height in pixels, when known
    #[serde(default)]
    pub height: Option<u32>,
    /// Width in pixels, when known
    #[serde(default)]
    pub width: Option<u32>,
}

/// Signed-in user as reported by `/api/user/profile`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account identifier
    pub id: String,

    /// Display name
    pub display_name: String,

    /// Email address (may be empty)
    #[serde(default)]
    pub email: String,

    /// Subscription product (`premium`, `free`, ...)
    #[serde(default)]
    pub product: String,

    /// Whether the account can stream through the playback device
    #[serde(default)]
    pub is_premium: bool,

    /// Avatar images
    #[serde(default)]
    pub images: Vec<Image>,

    /// Follower count
    #[serde(default)]
    pub followers: u64,
}

impl UserProfile {
    /// First avatar URL, if any
    pub fn avatar_url(&self) -> Option<&str> {
        self.images.first().map(|i| i.url.as_str())
    }
}
