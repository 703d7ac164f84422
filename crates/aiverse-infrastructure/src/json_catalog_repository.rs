//! Catalog loader for JSON tool lists.

use std::path::PathBuf;

use aiverse_core::catalog::{Catalog, CatalogRepository, ToolRecord};
use aiverse_core::error::{AiverseError, Result};
use async_trait::async_trait;

/// The catalog shipped with the application.
const EMBEDDED_TOOLS: &str = include_str!("../data/ai_tools.json");

/// Where the tool list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The bundled list
    Embedded,
    /// A JSON array of tool records on disk
    File(PathBuf),
}

impl CatalogSource {
    /// `File` when a path is configured, `Embedded` otherwise.
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map(CatalogSource::File).unwrap_or(CatalogSource::Embedded)
    }
}

/// Loads and validates the catalog from JSON.
///
/// The document is an array of objects with `id`, `name`, `description`,
/// `category`, `link`, `tags` and `rating`. A record missing a required field
/// fails the whole load, as does anything `validate_records` rejects.
#[derive(Debug, Clone)]
pub struct JsonCatalogRepository {
    source: CatalogSource,
}

impl JsonCatalogRepository {
    pub fn new(source: CatalogSource) -> Self {
        Self { source }
    }

    pub fn embedded() -> Self {
        Self::new(CatalogSource::Embedded)
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Parses and validates a JSON document.
    pub fn parse(json: &str) -> Result<Catalog> {
        let records: Vec<ToolRecord> = serde_json::from_str(json)?;
        Catalog::new(records)
    }
}

#[async_trait]
impl CatalogRepository for JsonCatalogRepository {
    async fn load(&self) -> Result<Catalog> {
        let catalog = match &self.source {
            CatalogSource::Embedded => Self::parse(EMBEDDED_TOOLS)?,
            CatalogSource::File(path) => {
                let json = tokio::fs::read_to_string(path).await.map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        AiverseError::not_found("catalog file", path.display().to_string())
                    } else {
                        AiverseError::from(e)
                    }
                })?;
                Self::parse(&json)?
            }
        };

        tracing::info!(
            "[JsonCatalogRepository] Loaded {} tools in {} categories from {:?}",
            catalog.len(),
            catalog.index().buckets().len(),
            self.source
        );
        Ok(catalog)
    }
}
