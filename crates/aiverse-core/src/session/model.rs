//! Session domain models.

use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the identity provider.
///
/// Opaque to the rest of the application apart from these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Provider-assigned user id
    pub uid: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
            photo_url: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    /// Name to greet the user with: display name, else email, else uid.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// Current authentication status of the running application.
///
/// Starts `Unknown` until the identity provider reports for the first time,
/// then alternates between `Authenticated` and `Unauthenticated`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "identity", rename_all = "snake_case")]
pub enum SessionFlag {
    #[default]
    Unknown,
    Authenticated(Identity),
    Unauthenticated,
}

impl SessionFlag {
    /// Maps a provider notification to a flag.
    pub fn from_identity(identity: Option<Identity>) -> Self {
        match identity {
            Some(identity) => Self::Authenticated(identity),
            None => Self::Unauthenticated,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(SessionFlag::default(), SessionFlag::Unknown);
        assert!(!SessionFlag::Unknown.is_known());
        assert!(!SessionFlag::Unknown.is_authenticated());
    }

    #[test]
    fn test_from_identity() {
        let flag = SessionFlag::from_identity(Some(Identity::new("u1")));
        assert!(flag.is_authenticated());
        assert_eq!(flag.identity().map(|i| i.uid.as_str()), Some("u1"));

        assert_eq!(SessionFlag::from_identity(None), SessionFlag::Unauthenticated);
    }

    #[test]
    fn test_identity_label_fallbacks() {
        let identity = Identity::new("u1");
        assert_eq!(identity.label(), "u1");
        let identity = identity.with_email("a@example.com");
        assert_eq!(identity.label(), "a@example.com");
        let identity = identity.with_display_name("Ada");
        assert_eq!(identity.label(), "Ada");
    }

    #[test]
    fn test_identity_wire_names() {
        let identity = Identity::new("u1").with_photo_url("https://img/1.png");
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["photoURL"], "https://img/1.png");
        assert!(json.get("displayName").is_some());
    }
}
