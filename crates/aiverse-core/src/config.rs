use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::navigation::PROTECTED_ROUTES;

/// What the navigation controller shows for a protected destination while
/// the identity provider has not reported yet.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnknownSessionBehavior {
    /// Redirect to login immediately, as `can_enter` does.
    Redirect,
    /// Show a loading state until the flag resolves.
    Defer,
}

impl Default for UnknownSessionBehavior {
    fn default() -> Self {
        UnknownSessionBehavior::Redirect
    }
}

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RootConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// JSON file to load instead of the bundled catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Tags shown per tool card
    #[serde(default = "default_tag_display_limit")]
    pub tag_display_limit: usize,
}

fn default_tag_display_limit() -> usize {
    3
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: None,
            tag_display_limit: default_tag_display_limit(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    pub home: String,
    pub login: String,
    pub signup: String,
    pub protected: Vec<String>,
    pub unknown_session: UnknownSessionBehavior,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            home: "/".to_string(),
            login: "/login".to_string(),
            signup: "/signup".to_string(),
            protected: PROTECTED_ROUTES.iter().map(|r| r.to_string()).collect(),
            unknown_session: UnknownSessionBehavior::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct IdentityConfig {
    /// Page an emailed sign-in link opens
    pub sign_in_url: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            sign_in_url: "http://localhost:5173/login".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StorageConfig {
    /// Directory for uploaded files; the data dir is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
