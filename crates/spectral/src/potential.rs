//! Weighted copper and gold potential scores in [0, 100].
//!
//! The weights and the silica normalizer are calibration constants and must
//! not be derived from data.

use mineral_common::{MineralResult, MineralType, Raster};
use rayon::prelude::*;
use tracing::debug;

use crate::indices::MineralIndices;
use crate::lithology::LithologyIndices;
use crate::ensure_same_shape;

pub const KFELDSPAR_SCALE: f32 = 3.0;
pub const CLAY_SCALE: f32 = 2.0;
pub const SILICA_SCALE: f32 = 1.183;

pub const COPPER_KFELDSPAR_WEIGHT: f32 = 0.4;
pub const COPPER_CLAY_WEIGHT: f32 = 0.3;
pub const COPPER_IRON_OXIDE_WEIGHT: f32 = 0.15;
pub const COPPER_GRANITE_WEIGHT: f32 = 0.15;

pub const GOLD_SILICA_WEIGHT: f32 = 0.4;
pub const GOLD_CLAY_WEIGHT: f32 = 0.3;
pub const GOLD_KFELDSPAR_WEIGHT: f32 = 0.15;
pub const GOLD_IRON_OXIDE_WEIGHT: f32 = 0.15;

/// Copper and gold score rasters.
#[derive(Debug, Clone)]
pub struct PotentialScores {
    pub copper: Raster,
    pub gold: Raster,
}

impl PotentialScores {
    pub fn get(&self, mineral: MineralType) -> &Raster {
        match mineral {
            MineralType::Copper => &self.copper,
            MineralType::Gold => &self.gold,
        }
    }
}

#[inline]
fn to_percent(fraction: f32) -> f32 {
    let clipped = fraction.clamp(0.0, 1.0);
    if clipped.is_nan() {
        0.0
    } else {
        clipped * 100.0
    }
}

/// Porphyry copper score for one pixel.
#[inline]
pub fn copper_score(kfeldspar: f32, clay: f32, iron_oxide: f32, granite: f32) -> f32 {
    to_percent(
        kfeldspar / KFELDSPAR_SCALE * COPPER_KFELDSPAR_WEIGHT
            + clay / CLAY_SCALE * COPPER_CLAY_WEIGHT
            + (iron_oxide + 1.0) / 2.0 * COPPER_IRON_OXIDE_WEIGHT
            + granite * COPPER_GRANITE_WEIGHT,
    )
}

/// Epithermal gold score for one pixel.
#[inline]
pub fn gold_score(silica: f32, clay: f32, kfeldspar: f32, iron_oxide: f32) -> f32 {
    to_percent(
        silica / SILICA_SCALE * GOLD_SILICA_WEIGHT
            + clay / CLAY_SCALE * GOLD_CLAY_WEIGHT
            + (1.0 - kfeldspar / KFELDSPAR_SCALE) * GOLD_KFELDSPAR_WEIGHT
            + (iron_oxide + 1.0) / 2.0 * GOLD_IRON_OXIDE_WEIGHT,
    )
}

pub fn calculate_copper_potential(
    kfeldspar: &Raster,
    clay: &Raster,
    iron_oxide: &Raster,
    granite: &Raster,
) -> MineralResult<Raster> {
    ensure_same_shape(&[
        ("kfeldspar", kfeldspar),
        ("clay", clay),
        ("iron_oxide", iron_oxide),
        ("granite", granite),
    ])?;

    let data = (0..kfeldspar.len())
        .into_par_iter()
        .map(|i| {
            copper_score(
                kfeldspar.data[i],
                clay.data[i],
                iron_oxide.data[i],
                granite.data[i],
            )
        })
        .collect();
    Ok(kfeldspar.with_data(data))
}

pub fn calculate_gold_potential(
    silica: &Raster,
    clay: &Raster,
    kfeldspar: &Raster,
    iron_oxide: &Raster,
) -> MineralResult<Raster> {
    ensure_same_shape(&[
        ("silica", silica),
        ("clay", clay),
        ("kfeldspar", kfeldspar),
        ("iron_oxide", iron_oxide),
    ])?;

    let data = (0..silica.len())
        .into_par_iter()
        .map(|i| {
            gold_score(
                silica.data[i],
                clay.data[i],
                kfeldspar.data[i],
                iron_oxide.data[i],
            )
        })
        .collect();
    Ok(silica.with_data(data))
}

/// Score both commodities from the index and lithology rasters.
pub fn score_potentials(
    indices: &MineralIndices,
    lithology: &LithologyIndices,
) -> MineralResult<PotentialScores> {
    debug!("Calculating mineral potentials");

    let copper = calculate_copper_potential(
        &indices.kfeldspar,
        &indices.clay,
        &indices.iron_oxide,
        &lithology.granite,
    )?;
    let gold = calculate_gold_potential(
        &indices.silica,
        &indices.clay,
        &indices.kfeldspar,
        &indices.iron_oxide,
    )?;

    Ok(PotentialScores { copper, gold })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copper_extremes() {
        assert!((copper_score(3.0, 2.0, 1.0, 1.0) - 100.0).abs() < 1e-3);
        assert_eq!(copper_score(0.0, 0.0, -1.0, 0.0), 0.0);
    }

    #[test]
    fn test_gold_clips_above_one() {
        // silica at its clip ceiling pushes the raw sum past 1.0
        assert_eq!(gold_score(2.0, 2.0, 0.0, 1.0), 100.0);
    }

    #[test]
    fn test_copper_known_value() {
        let expected = (1.5 / 3.0 * 0.4 + 1.25 / 2.0 * 0.3 + 0.5 * 0.15 + 0.5 * 0.15) * 100.0;
        let got = copper_score(1.5, 1.25, 0.0, 0.5);
        assert!((got - expected).abs() < 1e-4, "{} vs {}", got, expected);
    }

    #[test]
    fn test_nan_input_scores_zero() {
        assert_eq!(copper_score(f32::NAN, 1.0, 0.0, 0.0), 0.0);
        assert_eq!(gold_score(1.0, f32::NAN, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let a = Raster::filled(1.0, 2, 2);
        let b = Raster::filled(1.0, 3, 2);
        assert!(calculate_copper_potential(&a, &a, &b, &a).is_err());
    }
}
