//! Persisted client state.
//!
//! # Module Structure
//!
//! - `model`: the `AppState` document
//! - `repository`: async storage trait

mod model;
mod repository;

pub use model::AppState;
pub use repository::StateRepository;
