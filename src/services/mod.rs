//! Business logic services

pub mod catalog;

/// Container for all services
#[derive(Clone, Default)]
pub struct Services {
    pub catalog: catalog::CatalogService,
}

impl Services {
    pub fn new() -> Self {
        Self {
            catalog: catalog::CatalogService::new(),
        }
    }
}
