//! Bootstrap — startup checks and data directory preparation.

use std::net::SocketAddr;

use crate::config::ServerConfig;

/// Verify server configuration before anything touches disk or network.
pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.server.listen.parse::<SocketAddr>().is_err() {
        anyhow::bail!(
            "listen address '{}' is not a valid socket address",
            config.server.listen
        );
    }
    if config.storage.data_dir.is_empty() {
        anyhow::bail!("storage data_dir is empty in configuration");
    }
    if config.admin.username.is_empty() || config.admin.password.is_empty() {
        anyhow::bail!("admin credentials are empty in configuration");
    }
    Ok(())
}

/// Create the directory tree the stores expect.
pub fn prepare_dirs(config: &ServerConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.storage.data_dir)?;
    std::fs::create_dir_all(config.resolve_upload_dir())?;
    Ok(())
}
