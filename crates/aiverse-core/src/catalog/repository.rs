//! Catalog repository trait.

use async_trait::async_trait;

use crate::catalog::model::Catalog;
use crate::error::Result;

/// Source of the tool catalog.
///
/// Implementations read the authored record list once and hand back a
/// validated [`Catalog`]; there are no write operations.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Loads and validates the catalog.
    async fn load(&self) -> Result<Catalog>;
}
