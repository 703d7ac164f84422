use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entry on the Blog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
    /// Site-relative link to the full post
    pub link: String,
}

impl BlogPost {
    /// Date as shown on the page, e.g. `June 25, 2025`.
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

/// One course on the Learn AI page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningTrack {
    pub title: String,
    pub description: String,
    /// External video or course URL
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutSection {
    pub heading: String,
    pub body: String,
}

/// The About page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutPage {
    pub title: String,
    pub intro: String,
    pub sections: Vec<AboutSection>,
    pub closing: String,
}
