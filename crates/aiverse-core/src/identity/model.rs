//! Identity request models.

use serde::{Deserialize, Serialize};

use crate::error::{AiverseError, Result};

/// Shortest password accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Loose shape check: one `@` with something on each side and a dot in the
/// domain. The provider does the real verification.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Checks the form before anything is sent to the provider.
    ///
    /// # Errors
    ///
    /// Returns a validation error carrying the message shown to the user.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AiverseError::validation("Please enter your name"));
        }
        if !is_valid_email(&self.email) {
            return Err(AiverseError::validation("Please enter a valid email address"));
        }
        if self.password != self.confirm_password {
            return Err(AiverseError::validation("Passwords do not match"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AiverseError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

/// Changes to the signed-in identity's public profile.
///
/// `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl ProfileUpdate {
    pub fn display_name(name: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
            photo_url: None,
        }
    }

    pub fn photo_url(url: impl Into<String>) -> Self {
        Self {
            display_name: None,
            photo_url: Some(url.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.photo_url.is_none()
    }
}
