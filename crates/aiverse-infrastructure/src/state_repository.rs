//! Persisted client state backed by `state.toml`.

use std::path::PathBuf;
use std::sync::Arc;

use aiverse_core::error::Result;
use aiverse_core::state::{AppState, StateRepository};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::paths::AiversePaths;
use crate::storage::AtomicTomlFile;

/// [`StateRepository`] over an atomically rewritten TOML file.
///
/// The state is read at construction and cached. Every change is a locked
/// read-modify-write of the file, after which the cache holds what was
/// written.
#[derive(Clone)]
pub struct TomlStateRepository {
    state: Arc<Mutex<AppState>>,
    file: Arc<AtomicTomlFile<AppState>>,
}

impl TomlStateRepository {
    /// Opens the repository at the default `state.toml` location.
    pub async fn new(paths: &AiversePaths) -> Result<Self> {
        Self::with_path(paths.state_file()?).await
    }

    pub async fn with_path(path: PathBuf) -> Result<Self> {
        let file = AtomicTomlFile::new(path);
        let initial_state = file.load()?.unwrap_or_default();

        Ok(Self {
            state: Arc::new(Mutex::new(initial_state)),
            file: Arc::new(file),
        })
    }

    /// Applies `f` to the state on disk under the file lock, then refreshes
    /// the cache from what was written. Fields changed by another process
    /// since this one loaded are kept.
    async fn modify<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppState),
    {
        let mut state = self.state.lock().await;
        *state = self.file.update(AppState::default(), f)?;
        Ok(())
    }
}

#[async_trait]
impl StateRepository for TomlStateRepository {
    async fn get_state(&self) -> Result<AppState> {
        Ok(self.state.lock().await.clone())
    }

    async fn save_state(&self, state: AppState) -> Result<()> {
        self.modify(move |current| *current = state).await
    }

    async fn get_email_for_sign_in(&self) -> Option<String> {
        self.state.lock().await.email_for_sign_in.clone()
    }

    async fn set_email_for_sign_in(&self, email: String) -> Result<()> {
        self.modify(move |state| state.email_for_sign_in = Some(email)).await
    }

    async fn clear_email_for_sign_in(&self) -> Result<()> {
        self.modify(|state| state.email_for_sign_in = None).await
    }

    async fn get_last_category(&self) -> Option<String> {
        self.state.lock().await.last_category.clone()
    }

    async fn set_last_category(&self, category: String) -> Result<()> {
        self.modify(move |state| state.last_category = Some(category)).await
    }
}
