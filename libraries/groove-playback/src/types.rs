//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Queue navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the end of the queue
    Next,

    /// Towards the start of the queue
    Previous,
}

/// Configuration for the playback bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Name the device registers under (default: "Groove Web Player")
    pub device_name: String,

    /// Initial device volume, 0.0-1.0 (default: 0.5)
    pub initial_volume: f32,

    /// How long `initialize` waits for a readiness event (default: 10s)
    pub ready_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            device_name: "Groove Web Player".to_string(),
            initial_volume: 0.5,
            ready_timeout: Duration::from_secs(10),
        }
    }
}
