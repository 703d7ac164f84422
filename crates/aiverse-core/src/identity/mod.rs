//! Identity collaborator.
//!
//! The external authentication service is reached only through the
//! [`IdentityProvider`] trait. Credential checks, token refresh and the
//! email-link or OAuth handshakes stay on the provider's side.
//!
//! # Module Structure
//!
//! - `model`: request types (`Registration`, `ProfileUpdate`) and form checks
//! - `provider`: the `IdentityProvider` trait

mod model;
mod provider;

pub use model::{MIN_PASSWORD_LEN, ProfileUpdate, Registration, is_valid_email};
pub use provider::{IdentityListener, IdentityProvider};
