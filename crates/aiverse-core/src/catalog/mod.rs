//! Tool catalog domain module.
//!
//! The catalog is a fixed list of [`ToolRecord`]s loaded once at startup.
//! Everything here is a pure function of that list:
//!
//! - `model`: the record type and the loaded [`Catalog`]
//! - `index`: grouping records into category buckets
//! - `search`: text + category filtering
//! - `validate`: the malformed-record policy applied by loaders
//! - `repository`: the loader trait implemented by infrastructure
//!
//! # Usage
//!
//! ```ignore
//! use aiverse_core::catalog::{group_by_category, search, ALL_CATEGORY};
//!
//! let index = group_by_category(&records);
//! let hits = search(&records, "chat", ALL_CATEGORY);
//! ```

mod index;
mod model;
mod repository;
mod search;
mod validate;

pub use index::{ALL_CATEGORY, CategoryBucket, CategoryIndex, CategorySummary, group_by_category};
pub use model::{Catalog, ToolRecord};
pub use repository::CatalogRepository;
pub use search::{matches_query, search};
pub use validate::{RESERVED_CATEGORIES, validate_records};
