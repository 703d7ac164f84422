//! Session-gated navigation.
//!
//! Classifies destinations as public or protected and decides, from the
//! current [`crate::session::SessionFlag`], whether a requested destination
//! renders or redirects to login. Everything here is pure.

mod model;
mod policy;

pub use model::{Access, Destination, NavigationDecision};
pub use policy::{PROTECTED_ROUTES, PUBLIC_ROUTES, RoutePolicy, can_enter};
