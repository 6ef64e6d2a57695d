//! Health, landing and metrics handlers.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::metrics::MetricsSnapshot;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct LandingResponse {
    pub service: String,
    pub version: String,
    pub endpoints: Vec<String>,
    pub uptime_secs: u64,
    pub requests: MetricsSnapshot,
}

/// GET / - Service descriptor
pub async fn landing_handler(Extension(state): Extension<Arc<AppState>>) -> Json<LandingResponse> {
    Json(LandingResponse {
        service: "Mineral Exploration Analysis API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec![
            "POST /analyze".to_string(),
            "GET /analyze/status".to_string(),
            "GET /health".to_string(),
            "GET /metrics".to_string(),
        ],
        uptime_secs: state.uptime_secs(),
        requests: state.metrics.snapshot(),
    })
}

/// GET /health - Basic health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /analyze/status
pub async fn status_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let body = match &state.prometheus {
        Some(handle) => handle.render(),
        None => state.metrics.render_text(),
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response()
}
