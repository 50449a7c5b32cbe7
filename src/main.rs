//! Fitlog API Server
//!
//! Run with: cargo run --bin fitlog
//!
//! # Configuration
//!
//! Read from `config.toml` in the usual locations (see `fitlog-cli config`),
//! then overridden by environment variables:
//! - `FITLOG_DATA_DIR`: Directory holding fitlog.db
//! - `FITLOG_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `FITLOG_API_PORT`: Port to listen on (default: 8000)
//! - `FITLOG_CORS_ORIGINS`: Comma-separated allowed origins
//! - `FITLOG_LOG_LEVEL` / `FITLOG_LOG_FORMAT`: Logging (or `RUST_LOG`)

use fitlog::api::{serve, AppState};
use fitlog::config::Config;
use fitlog::store::Store;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    fitlog::logging::init(&config.logging);

    tracing::info!("Starting Fitlog API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {:?}", config.storage.data_dir);

    // Open the record store
    let store = Arc::new(Store::open(&config.storage.data_path())?);
    tracing::info!("Record store opened");

    let state = AppState::new(Arc::clone(&store), config.api.clone());

    // Run server
    serve(state, &config.api).await?;

    // Graceful shutdown
    tracing::info!("Closing record store...");
    match Arc::try_unwrap(store) {
        Ok(store) => store.close()?,
        Err(_) => tracing::warn!("Record store still shared at shutdown; leaving it to drop"),
    }
    tracing::info!("Fitlog API server stopped");

    Ok(())
}
