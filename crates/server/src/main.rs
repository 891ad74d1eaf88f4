//! Recipe HTTP server.
//!
//! Reads configuration from the environment (and `.env`), opens one shared
//! store handle and serves until interrupted.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::{Config, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    info!("Starting recipe server on port {}", config.port);

    let store = config.open_store().await?;
    info!("Connected to {}/{}", config.database, config.collection);

    start_server(&config, Arc::new(store)).await
}
