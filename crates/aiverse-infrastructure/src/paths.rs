//! Unified path management for AIVERSE files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/aiverse/           # Config directory
//! ├── config.toml              # Application configuration
//! ├── state.toml               # Persisted client state
//! └── *.lock                   # Advisory locks for the files above
//!
//! ~/.local/share/aiverse/      # Data directory
//! └── uploads/                 # Local object storage
//! ```

use std::path::PathBuf;

use aiverse_core::error::{AiverseError, Result};

/// Environment variable that points at an alternative `config.toml`.
pub const CONFIG_ENV: &str = "AIVERSE_CONFIG";

const APP_DIR: &str = "aiverse";

/// Resolves every file location the application uses.
///
/// With a base directory (tests, portable installs) everything lives under
/// it; otherwise the platform config and data directories from `dirs` are
/// used.
#[derive(Debug, Clone, Default)]
pub struct AiversePaths {
    base: Option<PathBuf>,
}

impl AiversePaths {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// Returns the configuration directory (e.g., `~/.config/aiverse/`).
    pub fn config_dir(&self) -> Result<PathBuf> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| AiverseError::config("Cannot find config directory")),
        }
    }

    /// Returns the data directory (e.g., `~/.local/share/aiverse/`).
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.base {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| AiverseError::config("Cannot find data directory")),
        }
    }

    /// Path of `config.toml`.
    ///
    /// `AIVERSE_CONFIG` wins when set and no base directory was given.
    pub fn config_file(&self) -> Result<PathBuf> {
        if self.base.is_none() {
            if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
                return Ok(PathBuf::from(path));
            }
        }
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn state_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("state.toml"))
    }

    /// Default root for [`crate::LocalObjectStorage`].
    pub fn uploads_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("uploads"))
    }
}
