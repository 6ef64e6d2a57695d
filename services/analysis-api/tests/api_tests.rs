//! End-to-end tests for the analysis API router.
//!
//! Requests go straight through the router with `oneshot`; no socket is
//! bound.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::Engine;
use serde_json::{json, Value};
use tower::ServiceExt;

use analysis_api::build_router;
use analysis_api::config::AnalysisConfig;
use analysis_api::handlers::AnalysisResponse;
use analysis_api::scene::save_scene_file;
use analysis_api::state::AppState;
use test_utils::{anomaly_bands, aoi};

// ============================================================================
// Helper functions
// ============================================================================

fn small_config() -> AnalysisConfig {
    AnalysisConfig {
        scene_width: 40,
        scene_height: 40,
        ..Default::default()
    }
}

fn app() -> Router {
    build_router(Arc::new(AppState::new(small_config())))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn analyze(app: Router, body: Body) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn unit_degree_request(extra: Value) -> Value {
    let bbox = aoi::unit_degree();
    let mut request = json!({
        "lat_min": bbox.lat_min,
        "lat_max": bbox.lat_max,
        "lon_min": bbox.lon_min,
        "lon_max": bbox.lon_max,
    });
    if let (Some(base), Some(extra)) = (request.as_object_mut(), extra.as_object()) {
        base.extend(extra.clone());
    }
    request
}

// ============================================================================
// Health endpoints
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({"status": "ok"}));

    let (status, _) = get(app(), "/analyze/status").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_landing_lists_analyze() {
    let (status, body) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints.iter().any(|e| e == "POST /analyze"));
}

#[tokio::test]
async fn test_metrics_without_exporter() {
    let app = app();
    let (status, _) = analyze(app.clone(), Body::empty()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("analysis_requests_total 1"), "{}", text);
}

// ============================================================================
// Analysis
// ============================================================================

#[tokio::test]
async fn test_analyze_defaults() {
    let (status, body) = analyze(app(), Body::empty()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert!(body["copper_potential"]["host_rock"].is_string());
    assert!(body["gold_potential"]["environment"].is_string());

    let response: AnalysisResponse = serde_json::from_value(body).unwrap();
    let carlin = aoi::carlin();
    assert!((response.heatmap_bounds.lat_min - carlin.lat_min).abs() < 1e-9);
    assert!((response.heatmap_bounds.lon_max - carlin.lon_max).abs() < 1e-9);
    assert_eq!(response.copper_grid.resolution, 50);
    assert_eq!(response.gold_grid.rows().len(), 50);
    assert!(response.copper_grid.values.iter().all(|v| (0.0..=1.0).contains(v)));
    assert!(response.hotspots.len() <= 100);
    assert!(response
        .hotspots
        .iter()
        .all(|h| h.confidence >= 65.0 && h.confidence <= 100.0));

    for heatmap in [&response.copper_heatmap, &response.gold_heatmap] {
        let png = base64::engine::general_purpose::STANDARD
            .decode(heatmap)
            .unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}

#[tokio::test]
async fn test_analyze_is_idempotent() {
    let app = app();
    let request = json!({"grid_resolution": 12}).to_string();
    let (_, first) = analyze(app.clone(), Body::from(request.clone())).await;
    let (_, second) = analyze(app, Body::from(request)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_analyze_scene_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");
    save_scene_file(&anomaly_bands(), &path).unwrap();

    let request = unit_degree_request(json!({
        "scene_path": path,
        "grid_resolution": 10,
    }));
    let (status, body) = analyze(app(), Body::from(request.to_string())).await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let response: AnalysisResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.copper_clusters, 1);
    assert_eq!(response.gold_clusters, 1);
    assert_eq!(response.hotspots.len(), 54);
    assert!((response.copper_potential.max - 93.18).abs() < 0.05);
    assert_eq!(response.copper_grid.resolution, 10);

    // copper first, best first
    let top = &response.hotspots[0];
    assert_eq!(top.mineral, mineral_common::MineralType::Copper);
    assert!(top.confidence >= response.hotspots[3].confidence);
}

#[tokio::test]
async fn test_threshold_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");
    save_scene_file(&anomaly_bands(), &path).unwrap();

    let request = unit_degree_request(json!({
        "satellite_data_path": path,
        "threshold": 99.0,
    }));
    let (status, body) = analyze(app(), Body::from(request.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hotspots"], json!([]));
    assert_eq!(body["copper_clusters"], 0);
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_inverted_bbox_is_bad_request() {
    let request = json!({"lat_min": 41.0, "lat_max": 40.0});
    let (status, body) = analyze(app(), Body::from(request.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let (status, body) = analyze(app(), Body::from("{oops")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_missing_scene_is_not_found() {
    let request = json!({"scene_path": "/nonexistent/scene.json"});
    let (status, body) = analyze(app(), Body::from(request.to_string())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_zero_grid_resolution_rejected() {
    let request = json!({"grid_resolution": 0});
    let (status, _) = analyze(app(), Body::from(request.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_scene_file_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.json");
    let scene = json!({
        "width": usize::MAX / 2 + 2,
        "height": 2,
        "geotransform": [-117.0, 0.1, 0.0, 41.0, 0.0, -0.1],
        "red": [1.0, 1.0],
        "nir": [1.0, 1.0],
        "swir1": [1.0, 1.0],
        "swir2": [1.0, 1.0],
    });
    std::fs::write(&path, scene.to_string()).unwrap();

    let request = json!({"scene_path": path});
    let (status, body) = analyze(app(), Body::from(request.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["status"], "error");
}
