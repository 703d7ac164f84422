//! Catalog domain models.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::index::{CategoryIndex, CategorySummary, group_by_category};
use super::search::matches_query;
use super::validate::validate_records;
use crate::error::Result;

/// One catalogued external AI product.
///
/// Records are authored as static data and never change after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRecord {
    /// Stable identifier assigned when the data was written
    pub id: u32,
    /// Display name
    pub name: String,
    /// Human-readable summary
    pub description: String,
    /// Free-form category label; records are grouped by exact value
    pub category: String,
    /// Absolute URL of the tool (not validated)
    pub link: String,
    /// Ordered tags; only the first few are shown on cards
    #[serde(default)]
    pub tags: Vec<String>,
    /// Informational rating, not clamped
    pub rating: f64,
}

impl ToolRecord {
    /// Returns at most `limit` tags, in authored order.
    pub fn visible_tags(&self, limit: usize) -> &[String] {
        let end = self.tags.len().min(limit);
        &self.tags[..end]
    }
}

/// The loaded, validated catalog together with its category index.
///
/// Cheap to clone; the records are shared.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Arc<[ToolRecord]>,
    index: Arc<CategoryIndex>,
}

impl Catalog {
    /// Builds a catalog, rejecting malformed records.
    ///
    /// # Errors
    ///
    /// Returns `AiverseError::InvalidRecord` for the first record that fails
    /// [`validate_records`].
    pub fn new(records: Vec<ToolRecord>) -> Result<Self> {
        validate_records(&records)?;
        Ok(Self::from_validated(records))
    }

    /// Builds a catalog without validation.
    pub fn from_validated(records: Vec<ToolRecord>) -> Self {
        let index = group_by_category(&records);
        Self {
            records: records.into(),
            index: Arc::new(index),
        }
    }

    /// All records in authored order.
    pub fn records(&self) -> &[ToolRecord] {
        &self.records
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by id.
    pub fn get(&self, id: u32) -> Option<&ToolRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Category labels with their counts, `"All"` first.
    pub fn categories(&self) -> Vec<CategorySummary> {
        self.index.summaries()
    }

    /// Filters one category bucket by `query`.
    ///
    /// Same result as [`super::search`] over [`Catalog::records`], but reads the
    /// prebuilt bucket instead of scanning every record.
    pub fn search(&self, query: &str, category: &str) -> Vec<&ToolRecord> {
        self.index
            .bucket(category)
            .iter()
            .filter(|record| matches_query(record, query))
            .collect()
    }
}
