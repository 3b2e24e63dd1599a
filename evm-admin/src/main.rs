//! evm-admin - Event management administrator dashboard
//!
//! Serves the admin JSON API and browser UI over the shared event database.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use evm_common::config::{ensure_directory_exists, BootstrapConfig};
use evm_common::db::init_database;
use evm_admin::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for evm-admin
#[derive(Parser, Debug)]
#[command(name = "evm-admin")]
#[command(about = "Administrator dashboard for the event management system")]
#[command(version)]
struct Args {
    /// Bootstrap config file (TOML)
    #[arg(short, long, env = "EVM_CONFIG")]
    config: Option<PathBuf>,

    /// Folder holding the database file
    #[arg(short, long, env = "EVM_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Address to bind (overrides [admin] host)
    #[arg(long, env = "EVM_ADMIN_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides [admin] port)
    #[arg(short, long, env = "EVM_ADMIN_PORT")]
    port: Option<u16>,

    /// Bearer token required on /api/* (overrides [admin] admin_token)
    #[arg(long, env = "EVM_ADMIN_TOKEN", hide_env_values = true)]
    admin_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = BootstrapConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before any database delay
    info!(
        "Starting EVM Admin Dashboard (evm-admin) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = config.resolve_root_folder(args.root_folder.as_deref());
    ensure_directory_exists(&root_folder).context("Failed to create root folder")?;

    let db_path = config.database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    let admin_token = args
        .admin_token
        .filter(|t| !t.trim().is_empty())
        .or(config.admin.admin_token.clone());
    if admin_token.is_none() {
        warn!("No admin token configured; the admin API is open to anyone who can reach it");
    }

    let state = AppState::new(pool.clone(), admin_token);
    let app = build_router(state);

    let host = args.host.unwrap_or(config.admin.host.clone());
    let port = args.port.unwrap_or(config.admin.port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("evm-admin listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
