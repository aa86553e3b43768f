//! CakeShop Server — bakery order backend.
//!
//! Entry point that wires configuration, storage, token verification,
//! and the HTTP API together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use cakeshop_api::AppState;
use cakeshop_auth::TokenVerifier;
use cakeshop_core::config::AppConfig;
use cakeshop_core::error::AppError;
use cakeshop_database::memory::{MemoryOrderStore, MemoryUserStore};
use cakeshop_database::repositories::{OrderRepository, UserRepository};
use cakeshop_database::store::{OrderStore, UserStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("CAKESHOP_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber from configuration.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CakeShop v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(config);

    let (users, orders) = build_stores(&config).await?;

    let verifier = Arc::new(TokenVerifier::new(&config.auth)?);
    tracing::info!(domain = %config.auth.domain, "Token verification configured");

    let state = AppState::new(config.clone(), users, orders, verifier);
    let router = cakeshop_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(
            cakeshop_core::error::ErrorKind::Configuration,
            format!("Failed to bind {addr}"),
            e,
        ))?;

    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::with_source(
        cakeshop_core::error::ErrorKind::Internal,
        "Server exited with an error",
        e,
    ))?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Build the configured store pair: PostgreSQL repositories (with
/// migrations) or the in-process memory store.
async fn build_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn UserStore>, Arc<dyn OrderStore>), AppError> {
    match config.database.provider.as_str() {
        "memory" => {
            tracing::warn!("Using in-memory store; data will not survive a restart");
            Ok((
                Arc::new(MemoryUserStore::new()),
                Arc::new(MemoryOrderStore::new()),
            ))
        }
        "postgres" => {
            let pool = cakeshop_database::connection::create_pool(&config.database).await?;
            cakeshop_database::migration::run_migrations(&pool).await?;
            Ok((
                Arc::new(UserRepository::new(pool.clone())),
                Arc::new(OrderRepository::new(pool)),
            ))
        }
        other => Err(AppError::configuration(format!(
            "Unknown database provider: '{other}' (expected 'postgres' or 'memory')"
        ))),
    }
}

/// Resolve on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
