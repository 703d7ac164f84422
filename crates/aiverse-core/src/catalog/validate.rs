//! Malformed-record policy.

use std::collections::HashSet;

use super::index::ALL_CATEGORY;
use super::model::ToolRecord;
use crate::error::{AiverseError, Result};

/// Category labels a record may not use.
pub const RESERVED_CATEGORIES: &[&str] = &[ALL_CATEGORY];

/// Checks records before they are accepted into a catalog.
///
/// Rejects a blank name, a blank category, a reserved category label, and
/// duplicate ids. Stops at the first offending record.
pub fn validate_records(records: &[ToolRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());

    for record in records {
        if record.name.trim().is_empty() {
            return Err(AiverseError::invalid_record(Some(record.id), "name is empty"));
        }
        if record.category.trim().is_empty() {
            return Err(AiverseError::invalid_record(Some(record.id), "category is empty"));
        }
        if RESERVED_CATEGORIES.contains(&record.category.as_str()) {
            return Err(AiverseError::invalid_record(
                Some(record.id),
                format!("category '{}' is reserved", record.category),
            ));
        }
        if !seen.insert(record.id) {
            return Err(AiverseError::invalid_record(Some(record.id), "duplicate id"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, name: &str, category: &str) -> ToolRecord {
        ToolRecord {
            id,
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            link: String::new(),
            tags: Vec::new(),
            rating: 0.0,
        }
    }

    #[test]
    fn test_accepts_well_formed_records() {
        let records = vec![record(1, "ChatGPT", "Conversational AI"), record(2, "Claude", "Conversational AI")];
        assert!(validate_records(&records).is_ok());
        assert!(validate_records(&[]).is_ok());
    }

    #[test]
    fn test_rejects_blank_name() {
        let err = validate_records(&[record(4, "  ", "Search AI")]).unwrap_err();
        assert_eq!(err, AiverseError::invalid_record(Some(4), "name is empty"));
    }

    #[test]
    fn test_rejects_blank_category() {
        let err = validate_records(&[record(4, "Perplexity", "")]).unwrap_err();
        assert_eq!(err, AiverseError::invalid_record(Some(4), "category is empty"));
    }

    #[test]
    fn test_rejects_reserved_category() {
        let err = validate_records(&[record(9, "Everything", "All")]).unwrap_err();
        assert!(err.is_invalid_record());
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let err = validate_records(&[record(2, "A", "X"), record(2, "B", "Y")]).unwrap_err();
        assert_eq!(err, AiverseError::invalid_record(Some(2), "duplicate id"));
    }
}
