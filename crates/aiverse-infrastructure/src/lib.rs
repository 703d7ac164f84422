pub mod config_service;
pub mod content;
pub mod identity;
pub mod json_catalog_repository;
pub mod object_storage;
pub mod paths;
pub mod state_repository;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::content::StaticContentRepository;
pub use crate::identity::LocalIdentityProvider;
pub use crate::json_catalog_repository::{CatalogSource, JsonCatalogRepository};
pub use crate::object_storage::LocalObjectStorage;
pub use crate::paths::AiversePaths;
pub use crate::state_repository::TomlStateRepository;
