//! Wiring shared by every command.

use std::path::PathBuf;
use std::sync::Arc;

use aiverse_core::config::RootConfig;
use aiverse_core::navigation::RoutePolicy;
use aiverse_infrastructure::{
    AiversePaths, CatalogSource, ConfigService, JsonCatalogRepository, LocalObjectStorage, StaticContentRepository,
    TomlStateRepository,
};
use anyhow::{Context, Result};

pub struct AppContext {
    pub paths: AiversePaths,
    pub config_service: ConfigService,
    pub config: RootConfig,
    catalog_override: Option<PathBuf>,
}

impl AppContext {
    /// Reads `config.toml`. A missing file gives the defaults; a malformed one
    /// is an error.
    pub fn load(catalog_override: Option<PathBuf>) -> Result<Self> {
        let paths = AiversePaths::default();
        let config_service = ConfigService::new(&paths).context("Failed to locate config file")?;
        let config = config_service
            .get_config()
            .with_context(|| format!("Failed to read {}", config_service.config_path().display()))?;

        Ok(Self {
            paths,
            config_service,
            config,
            catalog_override,
        })
    }

    /// `--catalog` beats `[catalog] source`, which beats the bundled data.
    pub fn catalog_repository(&self) -> JsonCatalogRepository {
        let path = self
            .catalog_override
            .clone()
            .or_else(|| self.config.catalog.source.clone());
        JsonCatalogRepository::new(CatalogSource::from_option(path))
    }

    pub fn content_repository(&self) -> Result<StaticContentRepository> {
        StaticContentRepository::new().context("Failed to load bundled content")
    }

    pub async fn state_repository(&self) -> Result<Arc<TomlStateRepository>> {
        let repo = TomlStateRepository::new(&self.paths)
            .await
            .context("Failed to open state file")?;
        Ok(Arc::new(repo))
    }

    /// Uploads go to `[storage] upload_dir`, else the data directory.
    pub fn object_storage(&self) -> Result<Arc<LocalObjectStorage>> {
        let root = match &self.config.storage.upload_dir {
            Some(dir) => dir.clone(),
            None => self.paths.uploads_dir().context("Failed to locate uploads directory")?,
        };
        Ok(Arc::new(LocalObjectStorage::new(root)))
    }

    pub fn route_policy(&self) -> Result<RoutePolicy> {
        RoutePolicy::from_config(&self.config.navigation).context("Invalid [navigation] section")
    }
}
