//! HTTP surface for the incident query backend.
//!
//! Two operations: `POST /query` (retrieval + optional synthesis) and
//! `GET /health` (liveness, no external calls). All shared clients live in
//! `AppState`, built once from the environment before the listener binds —
//! a missing credential stops startup, not the first request.

mod core;
mod error_handler;
mod routes;

pub use error_handler::{AppError, AppResult};

use std::{env, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

use crate::core::app_state::AppState;
use crate::routes::{health_route::health, query::query_route::query};

/// Build state from the environment, bind, and serve until Ctrl+C.
///
/// # Errors
/// Configuration errors surface here before the listener binds; bind/serve
/// failures map to [`AppError::Bind`] / [`AppError::Server`].
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);

    let addr = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".into());

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::Bind)?;

    info!(%addr, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/query", post(query))
        .route("/health", get(health))
        .with_state(state)
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
