//! Text and category filtering over tool records.

use super::index::ALL_CATEGORY;
use super::model::ToolRecord;

/// Returns true when `record` matches the free-text `query`.
///
/// An empty query matches everything. Otherwise the lower-cased query, as
/// typed and including any whitespace, must occur in the lower-cased name,
/// description, or any single tag.
pub fn matches_query(record: &ToolRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();

    record.name.to_lowercase().contains(&needle)
        || record.description.to_lowercase().contains(&needle)
        || record
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

fn in_category(record: &ToolRecord, category: &str) -> bool {
    category == ALL_CATEGORY || record.category == category
}

/// Filters `records` to those in `category` that match `query`.
///
/// `"All"` selects every record; any other label selects records whose
/// category equals it exactly. Input order is preserved and nothing is
/// re-ranked, so repeated calls with the same arguments return the same
/// sequence.
pub fn search<'a>(records: &'a [ToolRecord], query: &str, category: &str) -> Vec<&'a ToolRecord> {
    records
        .iter()
        .filter(|record| in_category(record, category) && matches_query(record, query))
        .collect()
}
