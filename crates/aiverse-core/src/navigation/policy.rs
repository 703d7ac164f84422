//! Route access policy.

use std::collections::BTreeSet;

use super::model::{Access, Destination, NavigationDecision};
use crate::config::NavigationConfig;
use crate::error::{AiverseError, Result};
use crate::session::SessionFlag;

/// Public routes of the site.
pub const PUBLIC_ROUTES: &[&str] = &[
    "/", "/learnai", "/blog", "/about", "/contact", "/login", "/signup",
];

/// Routes that require a signed-in user.
pub const PROTECTED_ROUTES: &[&str] = &["/applications", "/profile"];

/// Fixed classification of destinations into public and protected.
///
/// Anything not listed as protected is public. Routes are compared without
/// regard to case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    protected: BTreeSet<String>,
    home: Destination,
    login: Destination,
    signup: Destination,
}

impl RoutePolicy {
    /// Builds a policy.
    ///
    /// # Errors
    ///
    /// Returns a config error when the login or sign-up destination is
    /// itself protected, which would redirect forever.
    pub fn new<I, S>(protected: I, home: Destination, login: Destination, signup: Destination) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let protected: BTreeSet<String> = protected
            .into_iter()
            .map(|path| Destination::new(path).route_key())
            .collect();

        for entry in [&login, &signup] {
            if protected.contains(&entry.route_key()) {
                return Err(AiverseError::config(format!(
                    "'{}' cannot be both the sign-in entry point and protected",
                    entry.route()
                )));
            }
        }

        Ok(Self {
            protected,
            home,
            login,
            signup,
        })
    }

    /// Builds a policy from the `[navigation]` config section.
    pub fn from_config(config: &NavigationConfig) -> Result<Self> {
        Self::new(
            config.protected.iter().cloned(),
            Destination::new(config.home.as_str()),
            Destination::new(config.login.as_str()),
            Destination::new(config.signup.as_str()),
        )
    }

    pub fn home(&self) -> &Destination {
        &self.home
    }

    pub fn login(&self) -> &Destination {
        &self.login
    }

    pub fn signup(&self) -> &Destination {
        &self.signup
    }

    /// True for the login and sign-up views.
    pub fn is_auth_entry(&self, destination: &Destination) -> bool {
        destination.same_route(&self.login) || destination.same_route(&self.signup)
    }

    pub fn access(&self, destination: &Destination) -> Access {
        if self.protected.contains(&destination.route_key()) {
            Access::Protected
        } else {
            Access::Public
        }
    }

    /// Protected routes, lower-cased, in sorted order.
    pub fn protected_routes(&self) -> impl Iterator<Item = &str> {
        self.protected.iter().map(String::as_str)
    }

    /// Decides whether `destination` may be rendered under `flag`.
    ///
    /// `Unknown` counts as not signed in, so protected content never
    /// flashes before the identity provider has answered.
    pub fn can_enter(&self, destination: &Destination, flag: &SessionFlag) -> NavigationDecision {
        match (self.access(destination), flag) {
            (Access::Public, _) => NavigationDecision::Allow,
            (Access::Protected, SessionFlag::Authenticated(_)) => NavigationDecision::Allow,
            (Access::Protected, SessionFlag::Unknown | SessionFlag::Unauthenticated) => {
                NavigationDecision::RedirectToLogin {
                    return_to: destination.clone(),
                }
            }
        }
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            protected: PROTECTED_ROUTES.iter().map(|r| r.to_lowercase()).collect(),
            home: Destination::new("/"),
            login: Destination::new("/login"),
            signup: Destination::new("/signup"),
        }
    }
}

/// Free-function form of [`RoutePolicy::can_enter`].
pub fn can_enter(policy: &RoutePolicy, destination: &Destination, flag: &SessionFlag) -> NavigationDecision {
    policy.can_enter(destination, flag)
}
