use std::sync::Arc;

use armory_core::ItemCatalog;

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<dyn ItemCatalog>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn ItemCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &dyn ItemCatalog {
        self.catalog.as_ref()
    }
}
