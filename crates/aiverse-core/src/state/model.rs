//! Application state domain model.

use serde::{Deserialize, Serialize};

/// Small client state that survives restarts.
///
/// # Fields
///
/// * `email_for_sign_in` - Address a sign-in link was last sent to. Needed to
///   complete an email-link sign-in opened from the same device.
/// * `last_category` - Catalog category selected last time.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_for_sign_in: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_category: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email_for_sign_in(&self) -> Option<&str> {
        self.email_for_sign_in.as_deref()
    }

    pub fn last_category(&self) -> Option<&str> {
        self.last_category.as_deref()
    }
}
