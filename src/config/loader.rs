use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/social-sync/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("social-sync").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The base URL is http(s)
    /// - Timeouts are non-zero and the connect timeout fits in the total
    /// - The propagation buffer is non-empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.api.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                message: format!("api.base_url '{}' must start with http:// or https://", base_url),
            });
        }

        if self.api.timeout_seconds == 0 || self.api.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "API timeouts must be greater than zero".to_string(),
            });
        }

        if self.api.connect_timeout_seconds > self.api.timeout_seconds {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "api.connect_timeout_seconds ({}) exceeds api.timeout_seconds ({})",
                    self.api.connect_timeout_seconds, self.api.timeout_seconds
                ),
            });
        }

        if self.reconcile.broadcast_capacity == 0 {
            return Err(ConfigError::ValidationError {
                message: "reconcile.broadcast_capacity must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
