//! Configuration for display grid generation.

use mineral_common::{MineralError, MineralResult};
use serde::{Deserialize, Serialize};

use crate::proxy::GridSource;

/// Cells per side when nothing else is requested.
pub const DEFAULT_GRID_RESOLUTION: usize = 50;

/// Largest accepted resolution. A 1000×1000 grid is already far finer
/// than any overlay needs.
pub const MAX_GRID_RESOLUTION: usize = 1000;

/// Configuration for the grid aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of cells along each side of the grid.
    pub resolution: usize,

    /// Which raster is gridded for copper.
    pub copper_source: GridSource,

    /// Which raster is gridded for gold.
    pub gold_source: GridSource,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_GRID_RESOLUTION,
            copper_source: GridSource::CopperProxy,
            gold_source: GridSource::GoldProxy,
        }
    }
}

impl GridConfig {
    /// Config with the default sources and the given resolution.
    pub fn with_resolution(resolution: usize) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    /// Override fields from `GRID_RESOLUTION`, `GRID_COPPER_SOURCE` and
    /// `GRID_GOLD_SOURCE`. Unparseable values are ignored.
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("GRID_RESOLUTION") {
            if let Ok(resolution) = val.trim().parse() {
                self.resolution = resolution;
            }
        }

        if let Ok(val) = std::env::var("GRID_COPPER_SOURCE") {
            if let Some(source) = GridSource::from_str(val.trim()) {
                self.copper_source = source;
            }
        }

        if let Ok(val) = std::env::var("GRID_GOLD_SOURCE") {
            if let Some(source) = GridSource::from_str(val.trim()) {
                self.gold_source = source;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> MineralResult<()> {
        if self.resolution == 0 {
            return Err(MineralError::invalid_parameter(
                "grid_resolution",
                "must be > 0",
            ));
        }

        if self.resolution > MAX_GRID_RESOLUTION {
            return Err(MineralError::invalid_parameter(
                "grid_resolution",
                format!("must be <= {}", MAX_GRID_RESOLUTION),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GridConfig::default();
        assert_eq!(config.resolution, 50);
        assert_eq!(config.copper_source, GridSource::CopperProxy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(GridConfig::with_resolution(0).validate().is_err());
        assert!(GridConfig::with_resolution(MAX_GRID_RESOLUTION + 1)
            .validate()
            .is_err());
        assert!(GridConfig::with_resolution(1).validate().is_ok());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: GridConfig = serde_json::from_str(r#"{"resolution": 20}"#).unwrap();
        assert_eq!(config.resolution, 20);
        assert_eq!(config.gold_source, GridSource::GoldProxy);
    }
}
