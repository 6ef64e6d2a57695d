//! Row-major raster storage and the four-band reflectance input.

use serde::{Deserialize, Serialize};

use crate::error::{MineralError, MineralResult};
use crate::geotransform::GeoTransform;

/// `width * height`, or a [`MineralError::ShapeMismatch`] naming `band` when
/// the product does not fit in `usize`.
pub fn sample_count(band: &str, width: usize, height: usize) -> MineralResult<usize> {
    width
        .checked_mul(height)
        .ok_or_else(|| MineralError::ShapeMismatch {
            band: band.to_string(),
            expected: "a sample count that fits in memory".to_string(),
            actual: format!("{}x{}", height, width),
        })
}

/// A single-band raster stored in row-major order (row 0 first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raster {
    pub data: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl Raster {
    /// Create a raster, checking that `data` matches `width * height`.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> MineralResult<Self> {
        let expected = sample_count("raster", width, height)?;
        if data.len() != expected {
            return Err(MineralError::ShapeMismatch {
                band: "raster".to_string(),
                expected: format!("{}x{} ({} samples)", height, width, expected),
                actual: format!("{} samples", data.len()),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Raster with every sample set to `value`.
    pub fn filled(value: f32, width: usize, height: usize) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Build a raster from the same shape as `self` with new samples.
    pub fn with_data(&self, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            data,
            width: self.width,
            height: self.height,
        }
    }

    /// (height, width)
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the value at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    /// Largest finite sample, if any.
    pub fn max_finite(&self) -> Option<f32> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f32| m.max(v))))
    }

    /// Mean of the finite samples, if any.
    pub fn mean_finite(&self) -> Option<f32> {
        let (sum, count) = self
            .data
            .iter()
            .filter(|v| v.is_finite())
            .fold((0.0f64, 0usize), |(s, n), &v| (s + v as f64, n + 1));
        if count == 0 {
            None
        } else {
            Some((sum / count as f64) as f32)
        }
    }
}

/// The four reflectance bands used by every stage of the analysis, plus the
/// shared geotransform.
///
/// Constructing a `BandSet` is the only place band shapes are checked.
#[derive(Debug, Clone)]
pub struct BandSet {
    pub red: Raster,
    pub nir: Raster,
    pub swir1: Raster,
    pub swir2: Raster,
    pub transform: GeoTransform,
}

impl BandSet {
    pub fn new(
        red: Raster,
        nir: Raster,
        swir1: Raster,
        swir2: Raster,
        transform: GeoTransform,
    ) -> MineralResult<Self> {
        if red.is_empty() {
            return Err(MineralError::EmptyRaster("red band has no samples".to_string()));
        }

        let expected = red.shape();
        for (name, band) in [("nir", &nir), ("swir1", &swir1), ("swir2", &swir2)] {
            if band.shape() != expected {
                return Err(MineralError::ShapeMismatch {
                    band: name.to_string(),
                    expected: format!("{}x{}", expected.0, expected.1),
                    actual: format!("{}x{}", band.height, band.width),
                });
            }
        }

        if !transform.is_invertible() {
            return Err(MineralError::DegenerateTransform);
        }

        Ok(Self {
            red,
            nir,
            swir1,
            swir2,
            transform,
        })
    }

    pub fn width(&self) -> usize {
        self.red.width
    }

    pub fn height(&self) -> usize {
        self.red.height
    }

    /// (height, width)
    pub fn shape(&self) -> (usize, usize) {
        self.red.shape()
    }
}
