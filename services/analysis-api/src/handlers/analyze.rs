//! POST /analyze
//!
//! Runs the full pipeline on the configured (or requested) scene and returns
//! hotspots, display grids, heatmaps and the geological assessment in one
//! document.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use base64::Engine;
use grid_processor::DisplayGrid;
use hotspot::Hotspot;
use mineral_common::{BoundingBox, MineralError, MineralResult, MineralType};
use serde::{Deserialize, Serialize};
use spectral::assessment::{MineralSignatures, PotentialSummary, Recommendations, RiskAssessment};
use tracing::{error, info, warn};

use crate::config::AnalysisConfig;
use crate::pipeline::{run_analysis, AnalysisOptions, AnalysisOutput};
use crate::scene::{load_scene, SceneSource};
use crate::state::AppState;

/// Request body. Every field is optional; missing ones fall back to the
/// service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub lat_min: Option<f64>,
    pub lat_max: Option<f64>,
    pub lon_min: Option<f64>,
    pub lon_max: Option<f64>,
    pub threshold: Option<f32>,
    pub grid_resolution: Option<usize>,
    #[serde(alias = "satellite_data_path")]
    pub scene_path: Option<PathBuf>,
}

impl AnalyzeRequest {
    /// Merge the request over the service defaults.
    pub fn resolve(&self, config: &AnalysisConfig) -> (AnalysisOptions, SceneSource) {
        let mut options = AnalysisOptions::from_config(config);
        let aoi = config.default_aoi;
        options.bbox = BoundingBox::new(
            self.lat_min.unwrap_or(aoi.lat_min),
            self.lat_max.unwrap_or(aoi.lat_max),
            self.lon_min.unwrap_or(aoi.lon_min),
            self.lon_max.unwrap_or(aoi.lon_max),
        );
        if let Some(threshold) = self.threshold {
            options.detector.threshold = threshold;
        }
        if let Some(resolution) = self.grid_resolution {
            options.grid.resolution = resolution;
        }

        let source = match &self.scene_path {
            Some(path) => SceneSource::JsonFile(path.clone()),
            None => config.scene_source(),
        };
        (options, source)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub status: String,
    pub hotspots: Vec<Hotspot>,
    pub copper_clusters: usize,
    pub gold_clusters: usize,
    pub copper_potential: PotentialSummary,
    pub gold_potential: PotentialSummary,
    pub minerals: MineralSignatures,
    pub risk_assessment: RiskAssessment,
    pub recommendations: Recommendations,
    /// Base64 PNG of the copper score raster.
    pub copper_heatmap: String,
    /// Base64 PNG of the gold score raster.
    pub gold_heatmap: String,
    pub heatmap_bounds: BoundingBox,
    pub copper_grid: DisplayGrid,
    pub gold_grid: DisplayGrid,
}

impl AnalysisResponse {
    pub fn from_output(output: &AnalysisOutput) -> MineralResult<Self> {
        let encode = |mineral| -> MineralResult<String> {
            let png = output.heatmap(mineral).to_png()?;
            Ok(base64::engine::general_purpose::STANDARD.encode(png))
        };

        Ok(Self {
            status: "success".to_string(),
            hotspots: output.detection.all_hotspots(),
            copper_clusters: output.detection.copper.cluster_count(),
            gold_clusters: output.detection.gold.cluster_count(),
            copper_potential: output.geology.copper.clone(),
            gold_potential: output.geology.gold.clone(),
            minerals: output.geology.minerals.clone(),
            risk_assessment: output.geology.risk_assessment.clone(),
            recommendations: output.geology.recommendations.clone(),
            copper_heatmap: encode(MineralType::Copper)?,
            gold_heatmap: encode(MineralType::Gold)?,
            heatmap_bounds: output.bbox,
            copper_grid: output.copper_grid.clone(),
            gold_grid: output.gold_grid.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: &'static str,
    message: String,
}

fn error_response(state: &AppState, err: &MineralError) -> Response {
    let code = err.http_status_code();
    state.metrics.record_error(code);
    if code >= 500 {
        error!(error = %err, "Analysis failed");
    } else {
        warn!(error = %err, "Analysis request rejected");
    }

    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorResponse {
        status: "error",
        message: err.to_string(),
    };
    (status, Json(body)).into_response()
}

fn parse_request(body: &Bytes) -> MineralResult<AnalyzeRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AnalyzeRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| MineralError::invalid_parameter("body", format!("invalid JSON: {}", e)))
}

/// POST /analyze
pub async fn analyze_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Response {
    state.metrics.record_request();
    let start = Instant::now();

    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(e) => return error_response(&state, &e),
    };
    let (options, source) = request.resolve(&state.config);
    if let Err(e) = options.validate() {
        return error_response(&state, &e);
    }

    info!(bbox = ?options.bbox, source = ?source, "Starting analysis");

    let result = tokio::task::spawn_blocking(move || {
        let bands = load_scene(&source, &options.bbox)?;
        let output = run_analysis(&bands, &options)?;
        AnalysisResponse::from_output(&output)
    })
    .await
    .map_err(|e| MineralError::InternalError(format!("analysis task failed: {}", e)))
    .and_then(|r| r);

    match result {
        Ok(response) => {
            let elapsed = start.elapsed().as_millis() as u64;
            state.metrics.record_success(elapsed, response.hotspots.len());
            info!(
                hotspots = response.hotspots.len(),
                duration_ms = elapsed,
                "Analysis request complete"
            );
            Json(response).into_response()
        }
        Err(e) => error_response(&state, &e),
    }
}
