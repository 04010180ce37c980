pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;
use bodega_core::Module;

use service::ProductService;

/// Products module — product registration, lookup, and price updates.
pub struct ProductsModule {
    service: Arc<ProductService>,
}

impl ProductsModule {
    pub fn new(service: ProductService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl Module for ProductsModule {
    fn name(&self) -> &str {
        "products"
    }

    fn routes(&self) -> Router {
        api::router(self.service.clone())
    }
}
