//! Category grouping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::model::ToolRecord;

/// Label of the synthetic bucket holding every record.
pub const ALL_CATEGORY: &str = "All";

/// Records sharing one category label, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBucket {
    pub name: String,
    pub records: Vec<ToolRecord>,
}

impl CategoryBucket {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A category label and the number of records under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
}

/// Records grouped by exact category label, plus the synthetic `"All"` bucket.
///
/// Buckets keep first-seen order so category lists render deterministically.
/// Lookups for `"All"` always resolve to the synthetic bucket, even if some
/// record carries that label itself; such a record still lands in its own
/// real bucket, reachable through [`CategoryIndex::buckets`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryIndex {
    all: Vec<ToolRecord>,
    buckets: Vec<CategoryBucket>,
    positions: HashMap<String, usize>,
}

/// Groups `records` by category in a single pass.
///
/// Category labels are compared case-sensitively without normalization.
/// Empty input yields an index holding only an empty `"All"` bucket.
pub fn group_by_category(records: &[ToolRecord]) -> CategoryIndex {
    let mut buckets: Vec<CategoryBucket> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let slot = match positions.get(&record.category) {
            Some(&slot) => slot,
            None => {
                buckets.push(CategoryBucket {
                    name: record.category.clone(),
                    records: Vec::new(),
                });
                positions.insert(record.category.clone(), buckets.len() - 1);
                buckets.len() - 1
            }
        };
        buckets[slot].records.push(record.clone());
    }

    CategoryIndex {
        all: records.to_vec(),
        buckets,
        positions,
    }
}

impl CategoryIndex {
    /// Every record, in input order.
    pub fn all(&self) -> &[ToolRecord] {
        &self.all
    }

    /// Real category buckets in first-seen order (excludes `"All"`).
    pub fn buckets(&self) -> &[CategoryBucket] {
        &self.buckets
    }

    /// Records for `category`, or `None` for an unknown label.
    pub fn get(&self, category: &str) -> Option<&[ToolRecord]> {
        if category == ALL_CATEGORY {
            return Some(&self.all);
        }
        self.positions
            .get(category)
            .map(|&slot| self.buckets[slot].records.as_slice())
    }

    /// Records for `category`; unknown labels yield an empty slice.
    pub fn bucket(&self, category: &str) -> &[ToolRecord] {
        self.get(category).unwrap_or(&[])
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    /// Number of records under `category` (0 when unknown).
    pub fn count(&self, category: &str) -> usize {
        self.bucket(category).len()
    }

    /// Labels in display order, `"All"` first.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(ALL_CATEGORY).chain(self.buckets.iter().map(|b| b.name.as_str()))
    }

    /// Label/count pairs in display order, `"All"` first.
    pub fn summaries(&self) -> Vec<CategorySummary> {
        std::iter::once(CategorySummary {
            name: ALL_CATEGORY.to_string(),
            count: self.all.len(),
        })
        .chain(self.buckets.iter().map(|bucket| CategorySummary {
            name: bucket.name.clone(),
            count: bucket.len(),
        }))
        .collect()
    }
}
