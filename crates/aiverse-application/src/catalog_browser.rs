//! View state for the Applications page.

use aiverse_core::catalog::{ALL_CATEGORY, Catalog, CatalogRepository, CategorySummary, ToolRecord};
use anyhow::{Context, Result};
use serde::Serialize;

/// A tool as shown on a card: the record with its tags cut to the display
/// limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCard {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub link: String,
    pub tags: Vec<String>,
    /// Tags left off the card
    pub hidden_tags: usize,
    pub rating: f64,
}

impl ToolCard {
    pub fn from_record(record: &ToolRecord, tag_limit: usize) -> Self {
        let tags = record.visible_tags(tag_limit).to_vec();
        Self {
            id: record.id,
            name: record.name.clone(),
            description: record.description.clone(),
            category: record.category.clone(),
            link: record.link.clone(),
            hidden_tags: record.tags.len() - tags.len(),
            tags,
            rating: record.rating,
        }
    }
}

/// What the page body shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CatalogView {
    /// The catalog has not been loaded yet.
    Loading,
    /// Loaded, but nothing passes the current filters.
    NoMatches { query: String, category: String },
    Results { tools: Vec<ToolCard> },
}

/// Search box and category selection over a loaded [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    catalog: Option<Catalog>,
    query: String,
    category: String,
    tag_limit: usize,
}

impl CatalogBrowser {
    pub fn new(tag_limit: usize) -> Self {
        Self {
            catalog: None,
            query: String::new(),
            category: ALL_CATEGORY.to_string(),
            tag_limit,
        }
    }

    /// Loads the catalog; the browser stays `Loading` on failure.
    pub async fn load(&mut self, repository: &dyn CatalogRepository) -> Result<()> {
        let catalog = repository.load().await.context("Failed to load tool catalog")?;
        self.set_catalog(catalog);
        Ok(())
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = Some(catalog);
        let requested = std::mem::take(&mut self.category);
        self.select_category(&requested);
    }

    pub fn is_loading(&self) -> bool {
        self.catalog.is_none()
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Selects a category and returns the one in effect.
    ///
    /// Labels the loaded catalog does not know fall back to `"All"`. Before
    /// loading, the label is kept and checked once the catalog arrives.
    pub fn select_category(&mut self, label: &str) -> &str {
        self.category = match &self.catalog {
            Some(catalog) if !catalog.index().contains(label) => {
                tracing::debug!("[CatalogBrowser] Unknown category '{}', showing all", label);
                ALL_CATEGORY.to_string()
            }
            _ => label.to_string(),
        };
        &self.category
    }

    /// Category labels with counts, `"All"` first; empty while loading.
    pub fn categories(&self) -> Vec<CategorySummary> {
        self.catalog
            .as_ref()
            .map(Catalog::categories)
            .unwrap_or_default()
    }

    pub fn view(&self) -> CatalogView {
        let Some(catalog) = &self.catalog else {
            return CatalogView::Loading;
        };

        let tools: Vec<ToolCard> = catalog
            .search(&self.query, &self.category)
            .into_iter()
            .map(|record| ToolCard::from_record(record, self.tag_limit))
            .collect();

        if tools.is_empty() {
            CatalogView::NoMatches {
                query: self.query.clone(),
                category: self.category.clone(),
            }
        } else {
            CatalogView::Results { tools }
        }
    }
}
