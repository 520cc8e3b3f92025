use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// REST backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to (e.g., "https://api.example.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Which response wins when two toggles of the same field race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// Responses to superseded requests are discarded.
    #[default]
    LastRequest,
    /// Every response is applied in arrival order.
    LastResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    #[serde(default)]
    pub ordering: ResponseOrdering,
    /// Events buffered per mounted consumer before it has to resync (default: 256).
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Override for the persisted session file location.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `SOCIAL_SYNC_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_broadcast_capacity() -> usize {
    crate::store::DEFAULT_BROADCAST_CAPACITY
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            ordering: ResponseOrdering::default(),
            broadcast_capacity: default_broadcast_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
