//! Service configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, a YAML
//! file named by `ANALYSIS_CONFIG`, and individual environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grid_processor::GridConfig;
use hotspot::{DetectorConfig, DEFAULT_CONFIDENCE_THRESHOLD, MAX_HOTSPOTS_PER_MINERAL};
use mineral_common::{BoundingBox, MineralError, MineralResult};
use serde::{Deserialize, Serialize};

use crate::scene::SceneSource;

/// Carlin Trend, Nevada.
pub fn carlin_trend() -> BoundingBox {
    BoundingBox::new(40.97, 40.99, -116.39, -116.38)
}

/// Largest synthetic scene side, in pixels.
pub const MAX_SCENE_SIDE: usize = 4096;

/// Analysis service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Area analyzed when a request does not name one.
    pub default_aoi: BoundingBox,

    /// JSON scene file. When unset a synthetic scene is generated.
    pub scene_path: Option<PathBuf>,

    /// Seed of the synthetic scene.
    pub scene_seed: u64,

    /// Synthetic scene width in pixels.
    pub scene_width: usize,

    /// Synthetic scene height in pixels.
    pub scene_height: usize,

    /// Hotspot confidence threshold (0-100).
    pub hotspot_threshold: f32,

    /// Hotspots kept per commodity.
    pub max_hotspots: usize,

    /// Display grid settings.
    pub grid: GridConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_aoi: carlin_trend(),
            scene_path: None,
            scene_seed: 42,
            scene_width: 200,
            scene_height: 200,
            hotspot_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_hotspots: MAX_HOTSPOTS_PER_MINERAL,
            grid: GridConfig::default(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl AnalysisConfig {
    /// Load a YAML configuration file. Missing keys keep their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;

        tracing::info!(path = ?path, "Loaded analysis config");
        Ok(config)
    }

    /// Build configuration from `ANALYSIS_CONFIG` and the environment.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var("ANALYSIS_CONFIG") {
            Ok(path) if !path.is_empty() => Self::load_from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Override fields from individual environment variables.
    pub fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("SCENE_PATH") {
            if !path.is_empty() {
                self.scene_path = Some(PathBuf::from(path));
            }
        }
        if let Some(seed) = env_parse("SCENE_SEED") {
            self.scene_seed = seed;
        }
        if let Some(width) = env_parse("SCENE_WIDTH") {
            self.scene_width = width;
        }
        if let Some(height) = env_parse("SCENE_HEIGHT") {
            self.scene_height = height;
        }
        if let Some(threshold) = env_parse("HOTSPOT_THRESHOLD") {
            self.hotspot_threshold = threshold;
        }
        if let Some(max) = env_parse("MAX_HOTSPOTS") {
            self.max_hotspots = max;
        }
        self.grid.apply_env();
    }

    /// Validate the configuration.
    pub fn validate(&self) -> MineralResult<()> {
        self.default_aoi.validate()?;
        self.detector_config().validate()?;
        self.grid.validate()?;

        if self.scene_path.is_none() {
            for (param, side) in [
                ("scene_width", self.scene_width),
                ("scene_height", self.scene_height),
            ] {
                if side == 0 || side > MAX_SCENE_SIDE {
                    return Err(MineralError::invalid_parameter(
                        param,
                        format!("must be 1-{}", MAX_SCENE_SIDE),
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            threshold: self.hotspot_threshold,
            max_hotspots: self.max_hotspots,
        }
    }

    /// Scene used when a request does not name a file.
    pub fn scene_source(&self) -> SceneSource {
        match &self.scene_path {
            Some(path) => SceneSource::JsonFile(path.clone()),
            None => SceneSource::Synthetic {
                seed: self.scene_seed,
                width: self.scene_width,
                height: self.scene_height,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_processor::GridSource;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.hotspot_threshold, 65.0);
        assert_eq!(config.max_hotspots, 50);
        assert_eq!(config.grid.resolution, 50);
        assert_eq!(config.default_aoi, carlin_trend());
    }

    #[test]
    fn test_load_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "hotspot_threshold: 70.0\nscene_seed: 7\ngrid:\n  resolution: 20\n"
        )
        .unwrap();

        let config = AnalysisConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.hotspot_threshold, 70.0);
        assert_eq!(config.scene_seed, 7);
        assert_eq!(config.grid.resolution, 20);
        assert_eq!(config.max_hotspots, 50);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(AnalysisConfig::load_from_file("/nonexistent/analysis.yaml").is_err());
    }

    #[test]
    fn test_validation_errors() {
        let config = AnalysisConfig {
            scene_width: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalysisConfig {
            hotspot_threshold: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        // scene size is irrelevant for file scenes
        let config = AnalysisConfig {
            scene_width: 0,
            scene_path: Some(PathBuf::from("scene.json")),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_grid_sources_from_env() {
        // no other test in this crate reads the grid variables
        std::env::set_var("GRID_GOLD_SOURCE", "gold_score");
        std::env::set_var("GRID_COPPER_SOURCE", "not_a_source");
        let mut config = AnalysisConfig::default();
        config.apply_env();
        std::env::remove_var("GRID_GOLD_SOURCE");
        std::env::remove_var("GRID_COPPER_SOURCE");

        assert_eq!(config.grid.gold_source, GridSource::GoldScore);
        assert_eq!(config.grid.copper_source, GridSource::CopperProxy);
    }

    #[test]
    fn test_scene_source() {
        let config = AnalysisConfig::default();
        assert!(matches!(
            config.scene_source(),
            SceneSource::Synthetic { seed: 42, .. }
        ));
    }
}
