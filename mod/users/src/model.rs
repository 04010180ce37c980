use serde::{Deserialize, Serialize};

/// User payload bound from JSON or form bodies.
///
/// Fields default to empty strings so partial submissions still bind;
/// handlers echo whatever arrived rather than validating it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}
