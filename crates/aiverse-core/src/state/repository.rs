//! State repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::state::model::AppState;

/// Repository for the persisted [`AppState`].
#[async_trait]
pub trait StateRepository: Send + Sync {
    async fn get_state(&self) -> Result<AppState>;

    /// Saves the whole state document.
    async fn save_state(&self, state: AppState) -> Result<()>;

    async fn get_email_for_sign_in(&self) -> Option<String>;

    async fn set_email_for_sign_in(&self, email: String) -> Result<()>;

    async fn clear_email_for_sign_in(&self) -> Result<()>;

    async fn get_last_category(&self) -> Option<String>;

    async fn set_last_category(&self, category: String) -> Result<()>;
}
