//! Domain layer for the AIVERSE tool directory.
//!
//! Catalog model and search, the session flag and its store, route gating,
//! and the traits through which the outer layers reach the identity
//! provider, object storage, static content and persisted state. Nothing
//! here performs I/O.

pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod identity;
pub mod navigation;
pub mod session;
pub mod state;
pub mod storage;
pub mod subscription;
pub mod user;

// Re-export common error type
pub use error::AiverseError;
