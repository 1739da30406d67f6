//! bandcat-api - band catalog HTTP service
//!
//! Serves the band catalog over JSON/HTTP. The store backend, listen address
//! and seeding are taken from command line, environment, config file, or
//! compiled defaults, in that order.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bandcat_common::config::{
    load_toml_config, locate_config_file, ConfigOverrides, ServiceConfig, StoreKind,
};
use bandcat_api::{build_router, store, AppState};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for bandcat-api
#[derive(Parser, Debug)]
#[command(name = "bandcat-api")]
#[command(about = "Band catalog HTTP service")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "BANDCAT_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "BANDCAT_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "BANDCAT_PORT")]
    port: Option<u16>,

    /// Persistence backend: memory or sqlite
    #[arg(short, long, env = "BANDCAT_STORE")]
    store: Option<StoreKind>,

    /// SQLite database file (sqlite store only)
    #[arg(long, env = "BANDCAT_DB")]
    database: Option<PathBuf>,

    /// Start without the example bands
    #[arg(long)]
    no_seed: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, env = "BANDCAT_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            store: self.store,
            database_path: self.database.clone(),
            seed: self.no_seed.then_some(false),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = locate_config_file(args.config.as_deref());
    let file_config = load_toml_config(config_path.as_deref())
        .context("Failed to load configuration")?;
    let config = ServiceConfig::resolve(args.overrides(), file_config);

    // RUST_LOG wins over the configured level
    let default_filter = format!(
        "bandcat_api={0},bandcat_common={0},tower_http={0}",
        config.log_level
    );
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting bandcat-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config_path {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file, using defaults"),
    }
    info!("Store: {}, seed: {}", config.store, config.seed);

    let store = store::open_store(&config)
        .await
        .context("Failed to open band store")?;

    let app = build_router(AppState::new(store));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("bandcat-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
