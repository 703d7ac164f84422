//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` and caches it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use aiverse_core::config::RootConfig;
use aiverse_core::error::Result;

use crate::paths::AiversePaths;
use crate::storage::AtomicTomlFile;

/// Configuration service that loads and caches the root configuration.
///
/// A missing or blank file yields [`RootConfig::default`]; a malformed one is
/// an error rather than a silent fallback.
#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicTomlFile<RootConfig>>,
    /// Loaded lazily on first access.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a service for the resolved `config.toml` location.
    pub fn new(paths: &AiversePaths) -> Result<Self> {
        Ok(Self::with_path(paths.config_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config_path(&self) -> &Path {
        self.file.path()
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = match self.file.load()? {
            Some(config) => {
                tracing::debug!("[ConfigService] Loaded {}", self.config_path().display());
                config
            }
            None => {
                tracing::debug!(
                    "[ConfigService] No config at {}, using defaults",
                    self.config_path().display()
                );
                RootConfig::default()
            }
        };

        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Writes `config` to disk and refreshes the cache.
    pub fn save_config(&self, config: &RootConfig) -> Result<()> {
        self.file.save(config)?;
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(config.clone());
        tracing::info!("[ConfigService] Saved {}", self.config_path().display());
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }
}
