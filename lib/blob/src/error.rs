use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlobError {
    /// Key is empty, absolute, or escapes the store root.
    #[error("invalid blob key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(String),
}
