use thiserror::Error;

#[derive(Error, Debug)]
pub enum KVError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("storage error: {0}")]
    Storage(String),
}
