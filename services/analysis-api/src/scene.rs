//! Raster scene acquisition.
//!
//! A scene is four reflectance bands plus the geotransform that places them.
//! Scenes come either from a JSON file or from a seeded synthetic generator;
//! either way the result is validated as a [`BandSet`] before it reaches the
//! pipeline.

use std::f64::consts::TAU;
use std::path::{Path, PathBuf};

use mineral_common::{
    sample_count, BandSet, BoundingBox, GeoTransform, MineralError, MineralResult, Raster,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Where the bands come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneSource {
    /// Deterministic synthetic scene stretched over the requested AOI.
    Synthetic {
        seed: u64,
        width: usize,
        height: usize,
    },
    /// JSON scene document on disk.
    JsonFile(PathBuf),
}

/// On-disk scene document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub width: usize,
    pub height: usize,
    /// Six GDAL-order coefficients.
    pub geotransform: GeoTransform,
    pub red: Vec<f32>,
    pub nir: Vec<f32>,
    pub swir1: Vec<f32>,
    pub swir2: Vec<f32>,
}

impl SceneFile {
    pub fn from_bands(bands: &BandSet) -> Self {
        Self {
            width: bands.width(),
            height: bands.height(),
            geotransform: bands.transform,
            red: bands.red.data.clone(),
            nir: bands.nir.data.clone(),
            swir1: bands.swir1.data.clone(),
            swir2: bands.swir2.data.clone(),
        }
    }

    pub fn into_bands(self) -> MineralResult<BandSet> {
        let Self {
            width,
            height,
            geotransform,
            red,
            nir,
            swir1,
            swir2,
        } = self;

        let expected = sample_count("scene", width, height)?;
        let band = |name: &str, data: Vec<f32>| {
            if data.len() != expected {
                return Err(MineralError::ShapeMismatch {
                    band: name.to_string(),
                    expected: format!("{}x{}", height, width),
                    actual: format!("{} samples", data.len()),
                });
            }
            Raster::new(data, width, height)
        };

        BandSet::new(
            band("red", red)?,
            band("nir", nir)?,
            band("swir1", swir1)?,
            band("swir2", swir2)?,
            geotransform,
        )
    }
}

/// Read and validate a JSON scene.
pub fn load_scene_file(path: &Path) -> MineralResult<BandSet> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            MineralError::SceneNotFound(format!("Scene file not found: {}", path.display()))
        }
        _ => MineralError::SceneLoad(format!("{}: {}", path.display(), e)),
    })?;

    let scene: SceneFile = serde_json::from_slice(&bytes)
        .map_err(|e| MineralError::SceneLoad(format!("{}: {}", path.display(), e)))?;
    let bands = scene.into_bands()?;

    info!(
        path = %path.display(),
        width = bands.width(),
        height = bands.height(),
        "Loaded scene file"
    );
    Ok(bands)
}

/// Write a scene as JSON.
pub fn save_scene_file(bands: &BandSet, path: &Path) -> MineralResult<()> {
    let json = serde_json::to_vec(&SceneFile::from_bands(bands))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load the bands for `source`. Synthetic scenes are fitted to `aoi`.
pub fn load_scene(source: &SceneSource, aoi: &BoundingBox) -> MineralResult<BandSet> {
    match source {
        SceneSource::Synthetic {
            seed,
            width,
            height,
        } => synthetic_scene(*seed, *width, *height, aoi),
        SceneSource::JsonFile(path) => load_scene_file(path),
    }
}

#[derive(Debug, Clone, Copy)]
enum AlterationKind {
    /// Potassic core with argillic halo: copper signature.
    Porphyry,
    /// Silica cap: gold signature.
    Epithermal,
}

#[derive(Debug, Clone, Copy)]
struct Anomaly {
    kind: AlterationKind,
    row: f64,
    col: f64,
    sigma: f64,
    strength: f64,
}

impl Anomaly {
    fn weight(&self, row: usize, col: usize) -> f64 {
        let dr = row as f64 - self.row;
        let dc = col as f64 - self.col;
        self.strength * (-(dr * dr + dc * dc) / (2.0 * self.sigma * self.sigma)).exp()
    }

    /// Multiplicative factors for (red, nir, swir1, swir2) at full weight.
    fn factors(&self) -> [f64; 4] {
        match self.kind {
            AlterationKind::Porphyry => [-0.5, 0.4, 0.7, -0.15],
            AlterationKind::Epithermal => [0.0, -0.1, -0.2, 0.5],
        }
    }
}

const BACKGROUND: [f64; 4] = [2000.0, 2200.0, 2100.0, 2100.0];
const BACKGROUND_WAVE: f64 = 120.0;
const NOISE: f64 = 30.0;

/// Generate a reproducible scene: smooth background reflectance with a few
/// Gaussian alteration anomalies. The same seed always yields the same bands.
pub fn synthetic_scene(
    seed: u64,
    width: usize,
    height: usize,
    aoi: &BoundingBox,
) -> MineralResult<BandSet> {
    if width == 0 || height == 0 {
        return Err(MineralError::EmptyRaster(format!(
            "synthetic scene must be at least 1x1, got {}x{}",
            width, height
        )));
    }
    aoi.validate()?;
    let samples = sample_count("synthetic scene", width, height)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let min_side = width.min(height) as f64;

    let phases: [f64; 4] = std::array::from_fn(|_| rng.gen_range(0.0..TAU));
    let (fx, fy) = (rng.gen_range(0.5..2.0), rng.gen_range(0.5..2.0));

    let anomaly_count = rng.gen_range(3..=5);
    let anomalies: Vec<Anomaly> = (0..anomaly_count)
        .map(|i| Anomaly {
            kind: if i % 2 == 0 {
                AlterationKind::Porphyry
            } else {
                AlterationKind::Epithermal
            },
            row: rng.gen_range(0.1..0.9) * height as f64,
            col: rng.gen_range(0.1..0.9) * width as f64,
            sigma: (rng.gen_range(0.03..0.08) * min_side).max(1.0),
            strength: rng.gen_range(0.7..1.0),
        })
        .collect();

    let mut bands: [Vec<f32>; 4] = std::array::from_fn(|_| Vec::with_capacity(samples));
    for row in 0..height {
        for col in 0..width {
            let u = col as f64 / width as f64;
            let v = row as f64 / height as f64;

            let mut scale = [1.0f64; 4];
            for a in &anomalies {
                let w = a.weight(row, col);
                for (s, f) in scale.iter_mut().zip(a.factors()) {
                    *s *= 1.0 + f * w;
                }
            }

            for b in 0..4 {
                let wave = BACKGROUND_WAVE * (TAU * (fx * u + fy * v) + phases[b]).sin();
                let noise = rng.gen_range(-NOISE..NOISE);
                let value = (BACKGROUND[b] + wave + noise) * scale[b];
                bands[b].push(value.max(1.0) as f32);
            }
        }
    }

    debug!(seed, width, height, anomalies = anomalies.len(), "Generated synthetic scene");

    let [red, nir, swir1, swir2] = bands;
    BandSet::new(
        Raster::new(red, width, height)?,
        Raster::new(nir, width, height)?,
        Raster::new(swir1, width, height)?,
        Raster::new(swir2, width, height)?,
        GeoTransform::fit_to_bbox(aoi, width, height),
    )
}
