pub mod api;

use std::sync::Arc;

use axum::Router;
use bodega_core::Module;
use bodega_kv::KVStore;

/// Cache module — read and write keys in the shared KV store over HTTP.
pub struct CacheModule {
    kv: Arc<dyn KVStore>,
}

impl CacheModule {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }
}

impl Module for CacheModule {
    fn name(&self) -> &str {
        "cache"
    }

    fn routes(&self) -> Router {
        api::router(self.kv.clone())
    }
}
