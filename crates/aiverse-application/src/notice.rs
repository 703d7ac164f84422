//! User-facing status messages.

use aiverse_core::AiverseError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A message for the banner above a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    /// Error notice for a failed operation.
    ///
    /// Validation and provider messages are shown as-is; anything else falls
    /// back to `fallback` so internal details stay out of the banner.
    pub fn from_error(err: &anyhow::Error, fallback: &str) -> Self {
        match err.downcast_ref::<AiverseError>() {
            Some(AiverseError::Validation(message)) | Some(AiverseError::Identity(message)) => {
                Self::error(message.clone())
            }
            Some(AiverseError::Unauthenticated) => Self::error("Please sign in first"),
            _ => Self::error(fallback),
        }
    }
}
