//! Alteration mineral indices from Sentinel-2 style reflectance bands.
//!
//! | Index | Formula | Range |
//! |---|---|---|
//! | iron oxide | (SWIR1 − NIR) / (SWIR1 + NIR + ε) | [−1, 1] |
//! | clay | SWIR1 / SWIR2 | [0, 2] |
//! | silica | SWIR2 / SWIR1 | [0, 2] |
//! | K-feldspar | NIR / Red | [0, 3] |

use mineral_common::{BandSet, Raster};
use rayon::prelude::*;
use tracing::debug;

use crate::clip_or;

/// Replacement for non-positive reflectance samples.
pub const BAND_FLOOR: f32 = 1e-4;

/// Added to the normalized-difference denominator.
pub const RATIO_EPSILON: f32 = 1e-8;

pub const IRON_OXIDE_RANGE: (f32, f32) = (-1.0, 1.0);
pub const CLAY_RANGE: (f32, f32) = (0.0, 2.0);
pub const SILICA_RANGE: (f32, f32) = (0.0, 2.0);
pub const KFELDSPAR_RANGE: (f32, f32) = (0.0, 3.0);

/// The four mineral index rasters, same shape as the input bands.
#[derive(Debug, Clone)]
pub struct MineralIndices {
    pub iron_oxide: Raster,
    pub clay: Raster,
    pub silica: Raster,
    pub kfeldspar: Raster,
}

/// Reflectance of one pixel after the non-positive floor is applied.
#[derive(Debug, Clone, Copy)]
struct Reflectance {
    red: f32,
    nir: f32,
    swir1: f32,
    swir2: f32,
}

impl Reflectance {
    #[inline]
    fn at(bands: &BandSet, i: usize) -> Self {
        Self {
            red: floor_band(bands.red.data[i]),
            nir: floor_band(bands.nir.data[i]),
            swir1: floor_band(bands.swir1.data[i]),
            swir2: floor_band(bands.swir2.data[i]),
        }
    }
}

/// Non-positive samples become [`BAND_FLOOR`]; NaN passes through and is
/// caught by the per-index fallback.
#[inline]
fn floor_band(v: f32) -> f32 {
    if v <= 0.0 {
        BAND_FLOOR
    } else {
        v
    }
}

#[inline]
pub fn iron_oxide(swir1: f32, nir: f32) -> f32 {
    let (lo, hi) = IRON_OXIDE_RANGE;
    clip_or((swir1 - nir) / (swir1 + nir + RATIO_EPSILON), lo, hi, 0.0)
}

#[inline]
pub fn clay(swir1: f32, swir2: f32) -> f32 {
    let (lo, hi) = CLAY_RANGE;
    clip_or(swir1 / swir2, lo, hi, 0.0)
}

#[inline]
pub fn silica(swir2: f32, swir1: f32) -> f32 {
    let (lo, hi) = SILICA_RANGE;
    clip_or(swir2 / swir1, lo, hi, 0.0)
}

#[inline]
pub fn kfeldspar(nir: f32, red: f32) -> f32 {
    let (lo, hi) = KFELDSPAR_RANGE;
    clip_or(nir / red, lo, hi, 0.0)
}

fn per_pixel<F>(bands: &BandSet, f: F) -> Raster
where
    F: Fn(Reflectance) -> f32 + Sync,
{
    let data: Vec<f32> = (0..bands.red.len())
        .into_par_iter()
        .map(|i| f(Reflectance::at(bands, i)))
        .collect();
    bands.red.with_data(data)
}

/// Calculate the four mineral indices.
pub fn calculate_mineral_indices(bands: &BandSet) -> MineralIndices {
    let (height, width) = bands.shape();
    debug!(height, width, "Calculating mineral indices");

    MineralIndices {
        iron_oxide: per_pixel(bands, |p| iron_oxide(p.swir1, p.nir)),
        clay: per_pixel(bands, |p| clay(p.swir1, p.swir2)),
        silica: per_pixel(bands, |p| silica(p.swir2, p.swir1)),
        kfeldspar: per_pixel(bands, |p| kfeldspar(p.nir, p.red)),
    }
}
