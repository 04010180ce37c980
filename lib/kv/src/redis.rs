use async_trait::async_trait;
use fred::clients::RedisClient;
use fred::interfaces::{ClientLike, KeysInterface};
use fred::types::RedisConfig;
use tracing::info;

use crate::error::KVError;
use crate::store::KVStore;

/// RedisStore is a KVStore implementation backed by a Redis server.
///
/// One client is shared by all callers; fred multiplexes commands over a
/// single connection. Construction fails fast when the server is
/// unreachable instead of deferring the error to the first command.
pub struct RedisStore {
    client: RedisClient,
}

impl RedisStore {
    /// Connect to the Redis server at `url` (e.g. `redis://127.0.0.1:6379`).
    pub async fn connect(url: &str) -> Result<Self, KVError> {
        let config =
            RedisConfig::from_url(url).map_err(|e| KVError::Connection(e.to_string()))?;
        let client = RedisClient::new(config, None, None, None);

        client.connect();
        client
            .wait_for_connect()
            .await
            .map_err(|e| KVError::Connection(e.to_string()))?;

        info!("connected to redis at {}", url);
        Ok(Self { client })
    }
}

#[async_trait]
impl KVStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        self.client
            .get::<Option<Vec<u8>>, _>(key)
            .await
            .map_err(|e| KVError::Storage(e.to_string()))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.client
            .set::<(), _, _>(key, value.to_vec(), None, None, false)
            .await
            .map_err(|e| KVError::Storage(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), KVError> {
        self.client
            .del::<u64, _>(key)
            .await
            .map_err(|e| KVError::Storage(e.to_string()))?;
        Ok(())
    }
}
