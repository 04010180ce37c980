pub mod api;
pub mod model;

use std::sync::Arc;

use axum::Router;
use bodega_blob::BlobStore;
use bodega_core::Module;

/// Users module — path and query echoes, form and JSON binding, and
/// multipart uploads persisted to the blob store.
pub struct UsersModule {
    blob: Arc<dyn BlobStore>,
}

impl UsersModule {
    pub fn new(blob: Arc<dyn BlobStore>) -> Self {
        Self { blob }
    }
}

impl Module for UsersModule {
    fn name(&self) -> &str {
        "users"
    }

    fn routes(&self) -> Router {
        api::router(self.blob.clone())
    }
}
