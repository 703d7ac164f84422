//! Application layer for AIVERSE.
//!
//! Use cases that coordinate the domain model with the identity provider,
//! object storage and persisted state. Presentation layers drive these and
//! render what they return.

pub mod auth;
pub mod catalog_browser;
pub mod navigation;
pub mod notice;
pub mod profile;
pub mod session_binding;

pub use auth::{AuthUseCase, SignUpComplete};
pub use catalog_browser::{CatalogBrowser, CatalogView, ToolCard};
pub use navigation::{GuardOutcome, NavigationController};
pub use notice::{Notice, NoticeKind};
pub use profile::ProfileUseCase;
pub use session_binding::{SessionBinding, bind_session};
