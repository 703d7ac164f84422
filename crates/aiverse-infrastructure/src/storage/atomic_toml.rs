//! Atomic TOML file operations.
//!
//! Small documents (`config.toml`, `state.toml`) are rewritten whole: the new
//! content goes to a sibling temp file which is synced and renamed over the
//! target. Read-modify-write cycles hold an `fs2` advisory lock.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use aiverse_core::error::AiverseError;
use fs2::FileExt;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Errors that can occur during atomic TOML operations.
#[derive(Debug, Error)]
pub enum AtomicTomlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<AtomicTomlError> for AiverseError {
    fn from(err: AtomicTomlError) -> Self {
        match err {
            AtomicTomlError::Io(e) => AiverseError::from(e),
            AtomicTomlError::Parse(e) => AiverseError::from(e),
            AtomicTomlError::Serialize(e) => AiverseError::from(e),
            AtomicTomlError::Lock(message) => AiverseError::io(message),
        }
    }
}

/// A handle to a TOML document that is always replaced atomically.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is blank
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Writes `data` via temp file + rename, under the lock.
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        let _lock = FileLock::acquire(&self.path)?;
        self.write(data)
    }

    /// Loads (or starts from `default_value`), applies `f`, and saves, all
    /// under an exclusive lock. Returns the saved value.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<T, AtomicTomlError>
    where
        F: FnOnce(&mut T),
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data);
        self.write(&data)?;

        Ok(data)
    }

    /// Caller holds the lock; the temp file name is shared.
    fn write(&self, data: &T) -> Result<(), AtomicTomlError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicTomlError> {
        let invalid = |what: &str| {
            AtomicTomlError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, what.to_string()))
        };
        let parent = self.path.parent().ok_or_else(|| invalid("Path has no parent directory"))?;
        let file_name = self.path.file_name().ok_or_else(|| invalid("Path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Exclusive lock on `<file>.lock`, released when the handle closes. The
/// lock file itself stays on disk.
struct FileLock {
    _file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicTomlError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| AtomicTomlError::Lock(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { _file: file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    fn counter(count: u32) -> Counter {
        Counter {
            name: "clicks".to_string(),
            count,
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("c.toml"));

        file.save(&counter(42)).unwrap();
        assert_eq!(file.load().unwrap(), Some(counter(42)));
    }

    #[test]
    fn test_missing_and_blank_files_load_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("c.toml");
        let file = AtomicTomlFile::<Counter>::new(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_starts_from_default() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("nested").join("c.toml"));

        let saved = file.update(counter(0), |c| c.count += 10).unwrap();
        assert_eq!(saved.count, 10);

        let saved = file.update(counter(0), |c| c.count += 5).unwrap();
        assert_eq!(saved.count, 15);
        assert_eq!(file.load().unwrap().unwrap().count, 15);
    }

    #[test]
    fn test_no_leftovers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("c.toml");
        let file = AtomicTomlFile::<Counter>::new(path.clone());

        file.update(counter(1), |_| {}).unwrap();
        file.save(&counter(2)).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".c.toml.tmp").exists());
        assert_eq!(file.load().unwrap(), Some(counter(2)));
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("c.toml");

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let file = AtomicTomlFile::<Counter>::new(path);
                    for _ in 0..25 {
                        file.update(counter(0), |c| c.count += 1).unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let file = AtomicTomlFile::<Counter>::new(path);
        assert_eq!(file.load().unwrap().map(|c| c.count), Some(100));
    }

    #[test]
    fn test_parse_error_maps_to_serialization() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("c.toml");
        fs::write(&path, "name = [").unwrap();

        let err = AtomicTomlFile::<Counter>::new(path).load().unwrap_err();
        assert!(AiverseError::from(err).is_serialization());
    }
}
