//! UserProfile domain model.

use serde::{Deserialize, Serialize};

use crate::session::Identity;

/// What the Profile page shows and edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    /// Name to show; falls back to the email or uid when the provider has none
    pub display_name: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

impl From<&Identity> for UserProfile {
    fn from(identity: &Identity) -> Self {
        Self {
            uid: identity.uid.clone(),
            display_name: identity.label().to_string(),
            email: identity.email.clone(),
            photo_url: identity.photo_url.clone(),
        }
    }
}
