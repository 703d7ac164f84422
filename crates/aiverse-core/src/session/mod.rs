//! Session domain module.
//!
//! Holds the tri-state [`SessionFlag`] and the [`SessionStore`] that owns it.
//!
//! # Module Structure
//!
//! - `model`: `Identity` and `SessionFlag`
//! - `store`: the single-writer, multi-reader `SessionStore`

mod model;
mod store;

pub use model::{Identity, SessionFlag};
pub use store::SessionStore;
