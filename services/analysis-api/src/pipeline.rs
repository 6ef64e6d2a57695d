//! The full analysis pipeline as a pure function of bands and options.
//!
//! ```text
//! BandSet ─┬─► indices ──┬─► scores ─┬─► hotspot detection
//!          └─► lithology ┘           ├─► display grids (with indices)
//!                                    ├─► heatmaps
//!                                    └─► geological assessment
//! ```

use grid_processor::aggregate::grid_for_mineral;
use grid_processor::{DisplayGrid, GridConfig};
use hotspot::{detect_hotspots, DetectorConfig, HotspotDetection};
use mineral_common::{BandSet, BoundingBox, MineralResult, MineralType};
use renderer::{render_heatmap, Heatmap, ValueScale};
use spectral::{
    calculate_mineral_indices, classify_lithology, generate_geological_analysis,
    score_potentials, GeologicalAnalysis, LithologyIndices, MineralIndices, PotentialScores,
};
use tracing::{debug, info};

use crate::config::AnalysisConfig;

/// Per-call settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub bbox: BoundingBox,
    pub detector: DetectorConfig,
    pub grid: GridConfig,
}

impl AnalysisOptions {
    /// Options from the service defaults.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            bbox: config.default_aoi,
            detector: config.detector_config(),
            grid: config.grid,
        }
    }

    pub fn validate(&self) -> MineralResult<()> {
        self.bbox.validate()?;
        self.detector.validate()?;
        self.grid.validate()
    }
}

/// Everything the pipeline computes for one scene.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub bbox: BoundingBox,
    pub indices: MineralIndices,
    pub lithology: LithologyIndices,
    pub scores: PotentialScores,
    pub detection: HotspotDetection,
    pub copper_grid: DisplayGrid,
    pub gold_grid: DisplayGrid,
    pub copper_heatmap: Heatmap,
    pub gold_heatmap: Heatmap,
    pub geology: GeologicalAnalysis,
}

impl AnalysisOutput {
    pub fn grid(&self, mineral: MineralType) -> &DisplayGrid {
        match mineral {
            MineralType::Copper => &self.copper_grid,
            MineralType::Gold => &self.gold_grid,
        }
    }

    pub fn heatmap(&self, mineral: MineralType) -> &Heatmap {
        match mineral {
            MineralType::Copper => &self.copper_heatmap,
            MineralType::Gold => &self.gold_heatmap,
        }
    }
}

/// Run every stage over `bands`.
///
/// Holds no state between calls: identical inputs give identical outputs.
pub fn run_analysis(bands: &BandSet, options: &AnalysisOptions) -> MineralResult<AnalysisOutput> {
    options.validate()?;
    let (height, width) = bands.shape();
    debug!(width, height, bbox = ?options.bbox, "Running analysis pipeline");

    let indices = calculate_mineral_indices(bands);
    let lithology = classify_lithology(bands);
    let scores = score_potentials(&indices, &lithology)?;

    let detection = detect_hotspots(
        &scores.copper,
        &scores.gold,
        &bands.transform,
        &options.detector,
    )?;

    let grid = |mineral| {
        grid_for_mineral(
            mineral,
            &indices,
            &scores,
            &bands.transform,
            &options.bbox,
            &options.grid,
        )
    };
    let copper_grid = grid(MineralType::Copper)?;
    let gold_grid = grid(MineralType::Gold)?;

    let copper_heatmap = render_heatmap(&scores.copper.data, width, height, ValueScale::Percent)?;
    let gold_heatmap = render_heatmap(&scores.gold.data, width, height, ValueScale::Percent)?;

    let geology = generate_geological_analysis(&scores, &indices);

    info!(
        copper_clusters = detection.copper.cluster_count(),
        gold_clusters = detection.gold.cluster_count(),
        hotspots = detection.copper.hotspots.len() + detection.gold.hotspots.len(),
        copper_max = geology.copper.max,
        gold_max = geology.gold.max,
        "Analysis complete"
    );

    Ok(AnalysisOutput {
        bbox: options.bbox,
        indices,
        lithology,
        scores,
        detection,
        copper_grid,
        gold_grid,
        copper_heatmap,
        gold_heatmap,
        geology,
    })
}
