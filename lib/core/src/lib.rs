pub mod error;
pub mod extract;
pub mod module;
pub mod types;

pub use error::ServiceError;
pub use extract::JsonOrForm;
pub use module::Module;
pub use types::{new_id, now_rfc3339};
