//! Combination of indices and scores into the raster that gets gridded.

use mineral_common::Raster;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use spectral::{MineralIndices, PotentialScores};

/// Raster fed into the grid aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridSource {
    /// Mean of iron oxide and its ferrous proxy.
    CopperProxy,
    /// Clay index.
    GoldProxy,
    /// Copper potential score.
    CopperScore,
    /// Gold potential score.
    GoldScore,
}

impl GridSource {
    /// Parse from a config string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "copper_proxy" => Some(Self::CopperProxy),
            "gold_proxy" => Some(Self::GoldProxy),
            "copper_score" => Some(Self::CopperScore),
            "gold_score" => Some(Self::GoldScore),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CopperProxy => "copper_proxy",
            Self::GoldProxy => "gold_proxy",
            Self::CopperScore => "copper_score",
            Self::GoldScore => "gold_score",
        }
    }
}

impl std::fmt::Display for GridSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Iron oxide rescaled from [-1, 1] to [0, 1].
#[inline]
pub fn ferrous_proxy(iron_oxide: f32) -> f32 {
    (iron_oxide + 1.0) / 2.0
}

/// Copper proxy raster: `(iron_oxide + ferrous_proxy(iron_oxide)) / 2`.
pub fn copper_proxy(iron_oxide: &Raster) -> Raster {
    let data = iron_oxide
        .data
        .par_iter()
        .map(|&io| (io + ferrous_proxy(io)) / 2.0)
        .collect();
    iron_oxide.with_data(data)
}

/// Gold proxy raster: the clay index unchanged.
pub fn gold_proxy(clay: &Raster) -> Raster {
    clay.clone()
}

/// Build the raster named by `source`.
pub fn combine(source: GridSource, indices: &MineralIndices, scores: &PotentialScores) -> Raster {
    match source {
        GridSource::CopperProxy => copper_proxy(&indices.iron_oxide),
        GridSource::GoldProxy => gold_proxy(&indices.clay),
        GridSource::CopperScore => scores.copper.clone(),
        GridSource::GoldScore => scores.gold.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ferrous_proxy_range() {
        assert_eq!(ferrous_proxy(-1.0), 0.0);
        assert_eq!(ferrous_proxy(0.0), 0.5);
        assert_eq!(ferrous_proxy(1.0), 1.0);
    }

    #[test]
    fn test_copper_proxy() {
        let io = Raster::new(vec![-1.0, 0.0, 1.0, 0.2], 2, 2).unwrap();
        let proxy = copper_proxy(&io);
        assert_eq!(proxy.shape(), (2, 2));
        assert_eq!(proxy.data[0], -0.5);
        assert_eq!(proxy.data[1], 0.25);
        assert_eq!(proxy.data[2], 1.0);
        assert!((proxy.data[3] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_source_parsing() {
        assert_eq!(GridSource::from_str("copper-score"), Some(GridSource::CopperScore));
        assert_eq!(GridSource::from_str("GOLD_PROXY"), Some(GridSource::GoldProxy));
        assert_eq!(GridSource::from_str("silver"), None);
        assert_eq!(GridSource::GoldProxy.to_string(), "gold_proxy");
    }
}
