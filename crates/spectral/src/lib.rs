//! Per-pixel spectral analysis for mineral exploration.
//!
//! The three stages run in order and are pure functions of their inputs:
//!
//! ```text
//! BandSet ─┬─► indices::calculate_mineral_indices ─┬─► potential::score_potentials
//!          └─► lithology::classify_lithology ──────┘
//! ```
//!
//! Every output raster is finite and clipped to its documented range.
//! [`assessment`] turns the resulting rasters into summary statistics and
//! qualitative labels.

pub mod assessment;
pub mod indices;
pub mod lithology;
pub mod potential;

pub use assessment::{generate_geological_analysis, GeologicalAnalysis, SummaryStats};
pub use indices::{calculate_mineral_indices, MineralIndices};
pub use lithology::{classify_lithology, LithologyIndices};
pub use potential::{score_potentials, PotentialScores};

use mineral_common::{MineralError, MineralResult, Raster};

/// Check that every named raster has the shape of the first one.
pub(crate) fn ensure_same_shape(rasters: &[(&str, &Raster)]) -> MineralResult<()> {
    let Some((_, first)) = rasters.first() else {
        return Ok(());
    };
    let expected = first.shape();
    for (name, raster) in &rasters[1..] {
        if raster.shape() != expected {
            return Err(MineralError::ShapeMismatch {
                band: name.to_string(),
                expected: format!("{}x{}", expected.0, expected.1),
                actual: format!("{}x{}", raster.height, raster.width),
            });
        }
    }
    Ok(())
}

/// Clip to `[lo, hi]`, mapping NaN to `fallback`.
#[inline]
pub(crate) fn clip_or(value: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
    let clipped = value.clamp(lo, hi);
    if clipped.is_nan() {
        fallback
    } else {
        clipped
    }
}
