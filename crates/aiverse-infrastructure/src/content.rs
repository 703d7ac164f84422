//! Static pages bundled with the application.

use aiverse_core::content::{AboutPage, BlogPost, ContentRepository, LearningTrack};
use aiverse_core::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

const EMBEDDED_CONTENT: &str = include_str!("../data/content.toml");

#[derive(Debug, Clone, Deserialize)]
struct ContentDocument {
    blog_posts: Vec<BlogPost>,
    learning_tracks: Vec<LearningTrack>,
    about: AboutPage,
}

/// [`ContentRepository`] over the content compiled into the binary.
#[derive(Debug, Clone)]
pub struct StaticContentRepository {
    document: ContentDocument,
}

impl StaticContentRepository {
    pub fn new() -> Result<Self> {
        Self::from_toml(EMBEDDED_CONTENT)
    }

    /// Parses a content document with `blog_posts`, `learning_tracks` and
    /// `about` sections.
    pub fn from_toml(source: &str) -> Result<Self> {
        let mut document: ContentDocument = toml::from_str(source)?;
        document.blog_posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(Self { document })
    }
}

#[async_trait]
impl ContentRepository for StaticContentRepository {
    async fn blog_posts(&self) -> Result<Vec<BlogPost>> {
        Ok(self.document.blog_posts.clone())
    }

    async fn learning_tracks(&self) -> Result<Vec<LearningTrack>> {
        Ok(self.document.learning_tracks.clone())
    }

    async fn about(&self) -> Result<AboutPage> {
        Ok(self.document.about.clone())
    }
}
