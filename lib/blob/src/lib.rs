pub mod error;
pub mod file;
pub mod store;

pub use error::BlobError;
pub use file::FileStore;
pub use store::{BlobMeta, BlobStore};
