//! Session file persistence.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::session::types::Session;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to write session file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove session file '{path}': {source}")]
    RemoveError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode session: {0}")]
    EncodeError(#[from] serde_json::Error),
}

/// Reads and writes the session JSON file.
///
/// Loading is best-effort: a missing, unreadable or corrupt file yields an
/// empty session. Saving reports errors.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: expand_tilde(&path),
        }
    }

    /// `~/.local/share/social-sync/session.json` on Linux, or the platform
    /// equivalent via `dirs::data_dir()`.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("social-sync").join("session.json")
    }

    /// Store at `path`, or at [`SessionStore::default_path`] if none.
    pub fn at(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::new(path.to_path_buf()),
            None => Self::new(Self::default_path()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Session {
        if !self.path.exists() {
            return Session::default();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read session, starting logged out");
                return Session::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Corrupt session file, starting logged out");
                Session::default()
            }
        }
    }

    /// Write the session, replacing the file in one rename.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let content = serde_json::to_string_pretty(session)?;
        let write_err = |source| SessionError::WriteError {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Delete the session file. A missing file is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::RemoveError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
