use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cineteca_api::config::AppConfig;
use cineteca_api::database::DatabaseManager;
use cineteca_api::routes;
use cineteca_api::state::AppState;
use cineteca_api::tmdb::TmdbClient;

const DEFAULT_LOG_FILTER: &str = "cineteca_api=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    info!("Starting Cineteca API in {:?} mode", config.environment);

    if config.security.jwt_secret_is_fallback {
        warn!("JWT_SECRET not set; signing tokens with the development secret");
    }
    if config.tmdb.api_key.is_none() {
        warn!("TMDB_API_KEY not set; movie endpoints will answer 503");
    }

    let db = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    DatabaseManager::migrate(&db).await?;

    let catalog = Arc::new(TmdbClient::new(&config.tmdb)?);
    let port = config.server.port;
    let state = AppState::new(config, db, catalog)?;

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Cineteca API listening on http://{}", bind_addr);

    axum::serve(listener, routes::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}
