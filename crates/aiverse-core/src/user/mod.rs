//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: the editable `UserProfile` projection of an identity

mod model;

pub use model::UserProfile;
