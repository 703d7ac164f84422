use async_trait::async_trait;

use super::model::{AboutPage, BlogPost, LearningTrack};
use crate::error::Result;

/// Source of the site's static pages.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Posts, newest first.
    async fn blog_posts(&self) -> Result<Vec<BlogPost>>;

    async fn learning_tracks(&self) -> Result<Vec<LearningTrack>>;

    async fn about(&self) -> Result<AboutPage>;
}
