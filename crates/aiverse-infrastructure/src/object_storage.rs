//! Filesystem-backed object storage.

use std::path::{Component, Path, PathBuf};

use aiverse_core::error::{AiverseError, Result};
use aiverse_core::storage::ObjectStorage;
use async_trait::async_trait;

/// [`ObjectStorage`] that writes objects below a local directory and hands
/// back `file://` URLs.
#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    root: PathBuf,
}

impl LocalObjectStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps an object key to a file below the root.
    ///
    /// Keys are `/`-separated relative paths; absolute keys and empty, `.` or
    /// `..` segments are refused. A key without an extension gets one guessed from
    /// `content_type`.
    fn object_path(&self, key: &str, content_type: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let well_formed = !key.is_empty()
            && !key.split('/').any(|segment| matches!(segment, "" | "." | ".."))
            && relative.components().all(|c| matches!(c, Component::Normal(_)));
        if !well_formed {
            return Err(AiverseError::storage(format!("invalid object key '{}'", key)));
        }

        let mut path = self.root.join(relative);
        if path.extension().is_none() {
            if let Some(ext) = mime_guess::get_mime_extensions_str(content_type).and_then(|exts| exts.first()) {
                path.set_extension(ext);
            }
        }
        Ok(path)
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let path = self.object_path(key, content_type)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &bytes).await?;

        tracing::debug!(
            "[LocalObjectStorage] Stored {} bytes ({}) at {}",
            bytes.len(),
            content_type,
            path.display()
        );
        Ok(format!("file://{}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_upload_writes_file_and_guesses_extension() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalObjectStorage::new(temp_dir.path().to_path_buf());

        let url = storage
            .upload("profile_photos/u1/avatar", vec![1, 2, 3], "image/png")
            .await
            .unwrap();

        let expected = temp_dir.path().join("profile_photos/u1/avatar.png");
        assert_eq!(url, format!("file://{}", expected.display()));
        assert_eq!(std::fs::read(expected).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_explicit_extension_kept() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalObjectStorage::new(temp_dir.path().to_path_buf());

        let url = storage.upload("a/photo.jpg", vec![0], "image/png").await.unwrap();
        assert!(url.ends_with("a/photo.jpg"));
    }

    #[tokio::test]
    async fn test_rejects_escaping_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalObjectStorage::new(temp_dir.path().to_path_buf());

        for key in ["../x", "/etc/passwd", "", "a//b", "a/./b"] {
            let err = storage.upload(key, vec![0], "image/png").await.unwrap_err();
            assert!(matches!(err, AiverseError::Storage(_)), "key {:?}", key);
        }
    }
}
