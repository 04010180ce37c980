use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::KVError;
use crate::store::KVStore;

/// MemoryStore is an in-process KVStore for tests and local development.
/// Nothing persists beyond the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KVStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| KVError::Storage(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| KVError::Storage(e.to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KVError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| KVError::Storage(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
