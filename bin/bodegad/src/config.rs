//! Server configuration.
//!
//! Reads `/etc/bodega/<name>.toml` (or an explicit path). Every section
//! has defaults, so the server also starts with no config file at all.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Server configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// `[server]` section.
    #[serde(default)]
    pub server: HttpConfig,

    /// `[storage]` section.
    #[serde(default)]
    pub storage: StorageConfig,

    /// `[cache]` section.
    #[serde(default)]
    pub cache: CacheConfig,

    /// `[admin]` section.
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Listen address.
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the SQL database and uploaded files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Redis connection URL.
    #[serde(default = "default_cache_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,

    #[serde(default = "default_admin_password")]
    pub password: String,
}

fn default_listen() -> String {
    "0.0.0.0:1323".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_cache_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_admin_username() -> String {
    "joe".to_string()
}

fn default_admin_password() -> String {
    "secret".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: default_cache_url(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
        }
    }
}

impl ServerConfig {
    /// Resolve a config name or path to a file path.
    ///
    /// A bare name resolves to `/etc/bodega/<name>.toml`. Anything
    /// containing `/` or `.` is used as a path directly.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from("/etc/bodega").join(format!("{}.toml", name_or_path))
        }
    }

    /// Load config from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Path of the SQLite database file inside the data directory.
    pub fn resolve_sqlite_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir).join("bodega.sqlite")
    }

    /// Directory for uploaded files inside the data directory.
    pub fn resolve_upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir).join("uploads")
    }
}
