pub mod error;
pub mod memory;
pub mod redis;
pub mod store;

pub use error::KVError;
pub use memory::MemoryStore;
pub use redis::RedisStore;
pub use store::KVStore;
