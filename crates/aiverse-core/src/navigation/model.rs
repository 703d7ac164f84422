//! Navigation domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A requested view, identified by its path.
///
/// The original request (including any query or fragment) is kept verbatim
/// so it can be handed back after sign-in; [`Destination::route`] is the
/// normalized path used for access lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Destination(String);

impl Destination {
    pub fn new(path: impl Into<String>) -> Self {
        let raw: String = path.into();
        let trimmed = raw.trim();
        if trimmed.starts_with('/') {
            Self(trimmed.to_string())
        } else {
            Self(format!("/{}", trimmed))
        }
    }

    /// The destination as requested.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path without query or fragment and without a trailing slash
    /// (root stays `/`). Case is kept; see [`Destination::route_key`].
    pub fn route(&self) -> &str {
        let end = self.0.find(['?', '#']).unwrap_or(self.0.len());
        let path = self.0[..end].trim_end_matches('/');
        if path.is_empty() { "/" } else { path }
    }

    /// [`Destination::route`] lower-cased. Routes match case-insensitively,
    /// so `/Applications` is the same page as `/applications`.
    pub fn route_key(&self) -> String {
        self.route().to_lowercase()
    }

    /// True when both point at the same route, ignoring query, fragment and
    /// case.
    pub fn same_route(&self, other: &Destination) -> bool {
        self.route_key() == other.route_key()
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Destination {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Destination {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// Access class of a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    /// Anyone may enter
    Public,
    /// Requires an authenticated session
    Protected,
}

/// Outcome of a route-access check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum NavigationDecision {
    /// Render the requested destination.
    Allow,
    /// Send the user to the login view, then back to `return_to`.
    RedirectToLogin { return_to: Destination },
}

impl NavigationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}
