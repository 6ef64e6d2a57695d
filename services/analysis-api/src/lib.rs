//! Mineral exploration analysis service.
//!
//! Wraps the spectral, hotspot, grid and rendering crates behind a small
//! HTTP API. The analysis itself lives in [`pipeline`] and is usable without
//! the server.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod pipeline;
pub mod scene;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::state::AppState;

/// Routes of the analysis API. Middleware layers are added by the binary.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::landing_handler))
        .route("/analyze", post(handlers::analyze_handler))
        .route("/analyze/", post(handlers::analyze_handler))
        .route("/analyze/status", get(handlers::status_handler))
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(Extension(state))
}
