//! Hotspot detection over potential score rasters.
//!
//! Each commodity's score raster is thresholded into a [`BinaryMask`],
//! labeled into 4-connected components, and its highest-confidence pixels
//! are converted to geographic [`Hotspot`] records through the raster's
//! geotransform.

pub mod detector;
pub mod labeling;

pub use detector::{
    detect_hotspots, extract_hotspots, DetectorConfig, Hotspot, HotspotDetection,
    MineralDetection, DEFAULT_CONFIDENCE_THRESHOLD, MAX_HOTSPOTS_PER_MINERAL,
};
pub use labeling::{label_components, BinaryMask, ComponentLabels};
