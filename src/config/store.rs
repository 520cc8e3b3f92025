//! Thread-safe configuration storage.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Thread-safe config container with interior mutability.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path,
        }
    }

    /// Load from `path` (default config when the file is missing).
    pub fn open(path: PathBuf) -> Result<Self, ConfigError> {
        let config = Config::load_from(&path)?;
        Ok(Self::new(config, path))
    }

    pub fn get(&self) -> Config {
        self.inner.read().clone()
    }

    /// Reload config from the file.
    ///
    /// On success, atomically replaces the current config.
    /// On failure, keeps the old config and returns the error.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let config = Config::load_from(&self.path)?;
        *self.inner.write() = config;
        tracing::info!(path = %self.path.display(), "Config reloaded");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
