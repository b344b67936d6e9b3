/// CLI configuration
use groove_playback::BridgeConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GrooveConfig {
    #[serde(default = "default_backend")]
    pub backend: BackendSettings,

    #[serde(default = "default_player")]
    pub player: PlayerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendSettings {
    #[serde(default = "default_backend_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSettings {
    /// Name of the account device to drive
    #[serde(default = "default_device_name")]
    pub device_name: String,

    #[serde(default = "default_initial_volume")]
    pub initial_volume: f32,

    #[serde(default = "default_ready_timeout_secs")]
    pub ready_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

impl GrooveConfig {
    /// Load configuration from `groove.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("groove.toml"))
    }

    /// Load configuration from `path` (if present) and environment
    ///
    /// Environment variables use the `GROOVE_` prefix and `__` between
    /// section and key, e.g. `GROOVE_BACKEND__URL`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(path.to_path_buf()));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("GROOVE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.backend.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Backend URL is required (set GROOVE_BACKEND__URL)".to_string(),
            ));
        }

        let volume = self.player.initial_volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(ConfigError::Invalid(format!(
                "player.initial_volume must be between 0.0 and 1.0, got {}",
                volume
            )));
        }

        if self.player.ready_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "player.ready_timeout_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Settings for the playback bridge
    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            device_name: self.player.device_name.clone(),
            initial_volume: self.player.initial_volume,
            ready_timeout: Duration::from_secs(self.player.ready_timeout_secs),
        }
    }
}

impl Default for GrooveConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            player: default_player(),
            storage: default_storage(),
        }
    }
}

// Default values
fn default_backend() -> BackendSettings {
    BackendSettings {
        url: default_backend_url(),
    }
}

fn default_backend_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_player() -> PlayerSettings {
    PlayerSettings {
        device_name: default_device_name(),
        initial_volume: default_initial_volume(),
        ready_timeout_secs: default_ready_timeout_secs(),
    }
}

fn default_device_name() -> String {
    "Groove Web Player".to_string()
}

fn default_initial_volume() -> f32 {
    0.5
}

fn default_ready_timeout_secs() -> u64 {
    10
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        token_file: default_token_file(),
    }
}

fn default_token_file() -> PathBuf {
    PathBuf::from("./data/groove-tokens.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let config = GrooveConfig::default();
        assert_eq!(config.backend.url, "http://localhost:8001");
        assert_eq!(config.player.device_name, "Groove Web Player");
        assert!(config.validate().is_ok());

        let bridge = config.bridge_config();
        assert_eq!(bridge.initial_volume, 0.5);
        assert_eq!(bridge.ready_timeout, Duration::from_secs(10));
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("groove.toml");
        fs::write(
            &path,
            r#"
[backend]
url = "https://groove.example.com"

[player]
initial_volume = 0.8
"#,
        )
        .unwrap();

        let config = GrooveConfig::load_from(&path).unwrap();
        assert_eq!(config.backend.url, "https://groove.example.com");
        assert_eq!(config.player.initial_volume, 0.8);
        assert_eq!(config.player.ready_timeout_secs, 10);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = GrooveConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.storage.token_file, PathBuf::from("./data/groove-tokens.json"));
    }

    #[test]
    fn rejects_out_of_range_volume() {
        let mut config = GrooveConfig::default();
        config.player.initial_volume = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_empty_url() {
        let mut config = GrooveConfig::default();
        config.backend.url = "  ".into();
        assert!(config.validate().is_err());
    }
}
