//! Business logic services

pub mod catalog;
pub mod ids;

use std::sync::Arc;

use crate::{config::CatalogConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, catalog_config: &CatalogConfig) -> Self {
        let ids = Arc::new(ids::RandomIdGenerator::new(catalog_config.id_length));

        Self {
            catalog: catalog::CatalogService::new(repository, ids),
        }
    }
}
