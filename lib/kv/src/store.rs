use async_trait::async_trait;

use crate::error::KVError;

/// KVStore provides an async key-value cache interface.
///
/// Values are opaque bytes; callers decide the encoding. A missing key is
/// `Ok(None)`, never an error.
#[async_trait]
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, overwriting any existing value. Entries do
    /// not expire.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. No-op if the key does not exist.
    async fn delete(&self, key: &str) -> Result<(), KVError>;
}
