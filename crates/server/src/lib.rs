//! HTTP service for browsing and searching the recipe collection.
//!
//! This crate wires the record store into:
//! - `service`: listing, search and detail over a shared store handle
//! - `importer`: batched bulk import of raw recipe dumps
//! - `routes`: axum handlers for the JSON endpoints and the HTML detail page
//! - `config`: environment-driven process configuration

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use store::RecordStore;
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

pub mod config;
pub mod error;
pub mod importer;
pub mod render;
pub mod routes;
pub mod service;
pub mod state;

pub use config::Config;
pub use error::ServiceError;
pub use importer::{BulkImporter, ImportOptions, ImportReport};
pub use service::{PageParams, Pagination, RecipePage, RecipeService, SearchResults};
pub use state::AppState;

use routes::{get_recipe, list_recipes, recipe_page, search_recipes};

/// Build the application router over a shared state.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/search", get(search_recipes))
        .route("/recipes/{id}", get(get_recipe))
        .route("/recipe/{id}", get(recipe_page))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve until Ctrl+C or SIGTERM.
pub async fn start_server(config: &Config, store: Arc<dyn RecordStore>) -> Result<()> {
    info!("Serving recipes from the {} store", store.name());
    let app = build_router(AppState::new(store));

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
