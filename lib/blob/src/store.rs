use crate::error::BlobError;

/// Metadata for a stored blob.
#[derive(Debug, Clone)]
pub struct BlobMeta {
    pub key: String,
    pub size: u64,
}

/// BlobStore provides storage for binary objects (uploaded files).
///
/// Keys are relative path-like strings: `avatar.png`, `avatars/joe.png`.
/// The default implementation (`FileStore`) maps keys to local filesystem
/// paths; an object-storage backend would implement the same trait.
pub trait BlobStore: Send + Sync {
    /// Store a blob. Overwrites if the key already exists.
    fn put(&self, key: &str, data: &[u8]) -> Result<(), BlobError>;

    /// Retrieve a blob. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobError>;

    /// Delete a blob. No-op if the key does not exist.
    fn delete(&self, key: &str) -> Result<(), BlobError>;

    /// Check whether a blob exists.
    fn exists(&self, key: &str) -> Result<bool, BlobError>;

    /// List blobs matching a key prefix. Returns metadata sorted by key.
    fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, BlobError>;
}
