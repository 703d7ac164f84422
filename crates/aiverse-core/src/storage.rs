//! Object storage collaborator.

use async_trait::async_trait;

use crate::error::Result;

/// Remote file store used for profile photos.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` under `path` and returns a URL that serves them.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}
