//! Static site content: blog posts, learning tracks and the About page.

mod model;
mod repository;

pub use model::{AboutPage, AboutSection, BlogPost, LearningTrack};
pub use repository::ContentRepository;
