mod config;
mod error;
mod middleware;
mod routes;
mod state;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokatsu_core::store::{ContentStore, MemoryStore, PgStore};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `tokatsu-api hash-password <password>` prints a hash for ADMIN_PASSWORD_HASH.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, password] = args.as_slice() {
        if command == "hash-password" {
            println!("{}", tokatsu_core::auth::hash_password(password)?);
            return Ok(());
        }
    }

    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    tracing::info!("Starting Tokatsu site API server");

    let store = connect_store(&config).await?;
    let state = state::AppState::new(store, &config);

    // Build router with middleware
    let app = routes::build_router(state)
        .layer(middleware::body_limit_layer())
        .layer(middleware::request_tracing::trace_layer())
        .layer(middleware::cors::cors_layer());

    // Start server
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn connect_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ContentStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; content is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .min_connections(config.db_min_connections)
                .connect(url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to database: {e}"))?;

            tracing::info!("Connected to PostgreSQL");

            sqlx::migrate!("../../migrations")
                .run(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to run migrations: {e}"))?;

            tracing::info!("Database migrations applied");
            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("Received Ctrl+C, shutting down..."); }
        _ = terminate => { tracing::info!("Received SIGTERM, shutting down..."); }
    }
}
