//! `bodegad` — the Bodega server binary.
//!
//! Usage:
//!   bodegad [-c <config-name-or-path>] [--listen <addr>]
//!
//! The config name resolves to `/etc/bodega/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.
//! Without `-c` the built-in defaults apply.

mod auth_middleware;
mod bootstrap;
mod config;
mod routes;

use std::sync::Arc;

use bodega_core::Module;
use clap::Parser;
use tracing::info;

use cache::CacheModule;
use config::ServerConfig;
use products::ProductsModule;
use routes::AppState;
use users::UsersModule;

/// Bodega server.
#[derive(Parser, Debug)]
#[command(name = "bodegad", about = "Bodega demo server")]
struct Cli {
    /// Config name or path to config file.
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Listen address (overrides the configured one).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let mut server_config = match &cli.config {
        Some(name) => {
            let path = ServerConfig::resolve_path(name);
            info!("Loading configuration from {}", path.display());
            ServerConfig::load(&path)?
        }
        None => ServerConfig::default(),
    };
    if let Some(listen) = cli.listen {
        server_config.server.listen = listen;
    }

    // Verify configuration and prepare the data directory.
    bootstrap::verify_config(&server_config)?;
    bootstrap::prepare_dirs(&server_config)?;

    // Initialize stores (shared by all modules).
    let sql: Arc<dyn bodega_sql::SQLStore> = Arc::new(
        bodega_sql::SqliteStore::open(&server_config.resolve_sqlite_path())
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );
    let kv: Arc<dyn bodega_kv::KVStore> = Arc::new(
        bodega_kv::RedisStore::connect(&server_config.cache.url)
            .await
            .map_err(|e| anyhow::anyhow!("failed to connect to redis: {}", e))?,
    );
    let blob: Arc<dyn bodega_blob::BlobStore> = Arc::new(
        bodega_blob::FileStore::open(&server_config.resolve_upload_dir())
            .map_err(|e| anyhow::anyhow!("failed to open blob store: {}", e))?,
    );

    // Initialize modules.
    let users_module = UsersModule::new(Arc::clone(&blob));
    info!("Users module initialized");

    let products_module =
        ProductsModule::new(products::service::ProductService::new(Arc::clone(&sql)));
    info!("Products module initialized");

    let cache_module = CacheModule::new(Arc::clone(&kv));
    info!("Cache module initialized");

    let module_routes = vec![
        (users_module.name(), users_module.routes()),
        (products_module.name(), products_module.routes()),
        (cache_module.name(), cache_module.routes()),
    ];

    let listen = server_config.server.listen.clone();

    // Build application state and router.
    let app_state = AppState {
        server_config: Arc::new(server_config),
    };
    let app = routes::build_router(app_state, module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("Bodega server listening on {}", listen);
    axum::serve(listener, app).await?;

    Ok(())
}
