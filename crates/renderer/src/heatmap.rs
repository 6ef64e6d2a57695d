//! Heatmap rendering: one image pixel per input cell, colored by the fixed
//! potential legend.

use mineral_common::{sample_count, Legend, MineralError, MineralResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::png::create_png_indexed;

/// Minimum cells to bother with parallel bucketing
const PARALLEL_THRESHOLD: usize = 4096;

/// Units of the values being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueScale {
    /// Normalized grid values in [0, 1].
    #[default]
    Normalized,
    /// Potential scores in [0, 100].
    Percent,
}

impl ValueScale {
    /// Clamp into this scale's range and map onto [0, 1]. NaN maps to 0.
    #[inline]
    pub fn to_unit(self, value: f32) -> f32 {
        let (hi, divisor) = match self {
            ValueScale::Normalized => (1.0, 1.0),
            ValueScale::Percent => (100.0, 100.0),
        };
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(0.0, hi) / divisor
    }
}

/// Legend band index for every value.
pub fn bucket_indices(values: &[f32], scale: ValueScale, legend: &Legend) -> Vec<u8> {
    let bucket = |&v: &f32| legend.band_index(scale.to_unit(v)) as u8;
    if values.len() >= PARALLEL_THRESHOLD {
        values.par_iter().map(bucket).collect()
    } else {
        values.iter().map(bucket).collect()
    }
}

/// A rendered heatmap: palette indices plus the legend they refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub width: usize,
    pub height: usize,
    /// One legend band index per pixel, row-major.
    pub indices: Vec<u8>,
    pub legend: Legend,
}

impl Heatmap {
    /// Encode as an indexed PNG.
    pub fn to_png(&self) -> MineralResult<Vec<u8>> {
        create_png_indexed(self.width, self.height, &self.legend.palette(), &self.indices)
    }

    /// Pixels per legend band.
    pub fn histogram(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.legend.bands.len()];
        for &i in &self.indices {
            counts[i as usize] += 1;
        }
        counts
    }
}

/// Render a row-major `width` x `height` value array with the potential
/// legend.
pub fn render_heatmap(
    values: &[f32],
    width: usize,
    height: usize,
    scale: ValueScale,
) -> MineralResult<Heatmap> {
    if values.len() != sample_count("heatmap values", width, height)? {
        return Err(MineralError::ShapeMismatch {
            band: "heatmap values".to_string(),
            expected: format!("{}x{}", height, width),
            actual: format!("{} values", values.len()),
        });
    }
    if values.is_empty() {
        return Err(MineralError::EmptyRaster("heatmap values".to_string()));
    }

    let legend = Legend::potential();
    let indices = bucket_indices(values, scale, &legend);
    let heatmap = Heatmap {
        width,
        height,
        indices,
        legend,
    };

    debug!(width, height, ?scale, histogram = ?heatmap.histogram(), "Rendered heatmap");
    Ok(heatmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_unit() {
        assert_eq!(ValueScale::Normalized.to_unit(0.3), 0.3);
        assert_eq!(ValueScale::Normalized.to_unit(1.7), 1.0);
        assert_eq!(ValueScale::Normalized.to_unit(-2.0), 0.0);
        assert_eq!(ValueScale::Percent.to_unit(50.0), 0.5);
        assert_eq!(ValueScale::Percent.to_unit(250.0), 1.0);
        assert_eq!(ValueScale::Percent.to_unit(f32::NAN), 0.0);
        assert_eq!(ValueScale::Percent.to_unit(f32::INFINITY), 1.0);
    }

    #[test]
    fn test_bucket_boundaries() {
        let legend = Legend::potential();
        let values = [0.0, 0.2499, 0.25, 0.5, 0.74, 0.75, 1.0];
        assert_eq!(
            bucket_indices(&values, ValueScale::Normalized, &legend),
            vec![0, 0, 1, 2, 2, 3, 3]
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let legend = Legend::potential();
        let values: Vec<f32> = (0..10_000).map(|i| (i % 101) as f32).collect();
        let par = bucket_indices(&values, ValueScale::Percent, &legend);
        let seq: Vec<u8> = values
            .iter()
            .map(|&v| legend.band_index(ValueScale::Percent.to_unit(v)) as u8)
            .collect();
        assert_eq!(par, seq);
    }

    #[test]
    fn test_shape_checked() {
        assert!(render_heatmap(&[0.0; 5], 2, 2, ValueScale::Normalized).is_err());
        assert!(render_heatmap(&[], 0, 0, ValueScale::Normalized).is_err());
        assert!(render_heatmap(&[0.0; 2], usize::MAX, 2, ValueScale::Normalized).is_err());
    }
}
