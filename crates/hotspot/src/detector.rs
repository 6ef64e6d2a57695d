//! Threshold, label and geolocate high-confidence pixels.

use mineral_common::{GeoTransform, MineralError, MineralResult, MineralType, Raster};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::labeling::{label_components, BinaryMask, ComponentLabels};

/// Default confidence threshold (score units, 0-100).
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 65.0;

/// Upper bound on hotspots reported per commodity.
pub const MAX_HOTSPOTS_PER_MINERAL: usize = 50;

/// Detector settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Pixels with `score >= threshold` are hotspot candidates.
    pub threshold: f32,
    /// Maximum hotspots kept per commodity.
    pub max_hotspots: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_hotspots: MAX_HOTSPOTS_PER_MINERAL,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> MineralResult<()> {
        if !self.threshold.is_finite() {
            return Err(MineralError::invalid_parameter(
                "threshold",
                "must be a finite number",
            ));
        }
        if self.max_hotspots == 0 {
            return Err(MineralError::invalid_parameter(
                "max_hotspots",
                "must be > 0",
            ));
        }
        Ok(())
    }
}

/// A geolocated high-potential pixel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub mineral: MineralType,
    /// Score at the pixel, rounded to 2 decimals.
    pub confidence: f64,
    /// Pixel-center latitude, rounded to 6 decimals.
    pub lat: f64,
    /// Pixel-center longitude, rounded to 6 decimals.
    pub lon: f64,
    pub depth_min: u32,
    pub depth_max: u32,
}

/// Detection result for one commodity.
#[derive(Debug, Clone)]
pub struct MineralDetection {
    pub mineral: MineralType,
    pub score: Raster,
    pub mask: BinaryMask,
    pub components: ComponentLabels,
    /// Sorted by non-increasing confidence.
    pub hotspots: Vec<Hotspot>,
}

impl MineralDetection {
    pub fn cluster_count(&self) -> usize {
        self.components.count
    }
}

/// Detection results for both commodities.
#[derive(Debug, Clone)]
pub struct HotspotDetection {
    pub copper: MineralDetection,
    pub gold: MineralDetection,
}

impl HotspotDetection {
    pub fn get(&self, mineral: MineralType) -> &MineralDetection {
        match mineral {
            MineralType::Copper => &self.copper,
            MineralType::Gold => &self.gold,
        }
    }

    /// Copper hotspots followed by gold hotspots.
    pub fn all_hotspots(&self) -> Vec<Hotspot> {
        self.copper
            .hotspots
            .iter()
            .chain(self.gold.hotspots.iter())
            .cloned()
            .collect()
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Rank the set pixels of `mask` by descending score and geolocate the top
/// `max_hotspots`.
///
/// Equal scores keep row-major order, so the selection is reproducible.
pub fn extract_hotspots(
    mask: &BinaryMask,
    score: &Raster,
    transform: &GeoTransform,
    mineral: MineralType,
    max_hotspots: usize,
) -> Vec<Hotspot> {
    let mut candidates: Vec<(usize, usize, f32)> = mask
        .set_pixels()
        .filter_map(|(row, col)| score.get(row, col).map(|s| (row, col, s)))
        .collect();

    // stable sort: ties stay in scan order
    candidates.sort_by(|a, b| b.2.total_cmp(&a.2));
    candidates.truncate(max_hotspots);

    let depth = mineral.depth_range();
    candidates
        .into_iter()
        .map(|(row, col, s)| {
            let (lon, lat) = transform.pixel_center(row, col);
            Hotspot {
                mineral,
                confidence: round_to(s as f64, 2),
                lat: round_to(lat, 6),
                lon: round_to(lon, 6),
                depth_min: depth.min,
                depth_max: depth.max,
            }
        })
        .collect()
}

fn detect_one(
    mineral: MineralType,
    score: &Raster,
    transform: &GeoTransform,
    config: &DetectorConfig,
) -> MineralDetection {
    let mask = BinaryMask::threshold(score, config.threshold);
    let components = label_components(&mask);
    let hotspots = extract_hotspots(&mask, score, transform, mineral, config.max_hotspots);

    debug!(
        mineral = %mineral,
        candidates = mask.count_set(),
        clusters = components.count,
        hotspots = hotspots.len(),
        "Detected hotspots"
    );

    MineralDetection {
        mineral,
        score: score.clone(),
        mask,
        components,
        hotspots,
    }
}

/// Detect copper and gold hotspots.
///
/// An empty mask is not an error: it yields zero clusters and no hotspots.
pub fn detect_hotspots(
    copper: &Raster,
    gold: &Raster,
    transform: &GeoTransform,
    config: &DetectorConfig,
) -> MineralResult<HotspotDetection> {
    config.validate()?;
    if copper.shape() != gold.shape() {
        return Err(MineralError::ShapeMismatch {
            band: "gold score".to_string(),
            expected: format!("{}x{}", copper.height, copper.width),
            actual: format!("{}x{}", gold.height, gold.width),
        });
    }

    let (copper, gold) = rayon::join(
        || detect_one(MineralType::Copper, copper, transform, config),
        || detect_one(MineralType::Gold, gold, transform, config),
    );

    info!(
        copper_clusters = copper.cluster_count(),
        gold_clusters = gold.cluster_count(),
        threshold = config.threshold,
        "Hotspot detection complete"
    );

    Ok(HotspotDetection { copper, gold })
}
