//! Core types for grid processing.

use mineral_common::{BoundingBox, Legend, MineralType};
use serde::{Deserialize, Serialize};

use crate::proxy::GridSource;

/// Half-open pixel rectangle `[row_start, row_end) x [col_start, col_end)`
/// already clamped to the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl PixelWindow {
    pub fn is_empty(&self) -> bool {
        self.row_start >= self.row_end || self.col_start >= self.col_end
    }
}

/// Normalized N×N grid over an area of interest.
///
/// `values` is row-major with row 0 at the northern edge. Every value is in
/// [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GridPayload", try_from = "GridPayload")]
pub struct DisplayGrid {
    pub mineral: MineralType,
    pub source: GridSource,
    pub values: Vec<f32>,
    pub resolution: usize,
    pub bounds: BoundingBox,
    pub legend: Legend,
}

impl DisplayGrid {
    /// Rows from north to south.
    pub fn rows(&self) -> Vec<Vec<f32>> {
        if self.resolution == 0 {
            return Vec::new();
        }
        self.values
            .chunks(self.resolution)
            .map(|r| r.to_vec())
            .collect()
    }

    /// Number of cells with a non-zero value.
    pub fn active_cells(&self) -> usize {
        self.values.iter().filter(|&&v| v > 0.0).count()
    }
}

/// Wire form of [`DisplayGrid`]: nested rows instead of a flat buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridPayload {
    mineral: MineralType,
    source: GridSource,
    grid: Vec<Vec<f32>>,
    resolution: usize,
    bounds: BoundingBox,
    legend: Legend,
}

impl From<DisplayGrid> for GridPayload {
    fn from(grid: DisplayGrid) -> Self {
        Self {
            grid: grid.rows(),
            mineral: grid.mineral,
            source: grid.source,
            resolution: grid.resolution,
            bounds: grid.bounds,
            legend: grid.legend,
        }
    }
}

impl TryFrom<GridPayload> for DisplayGrid {
    type Error = String;

    fn try_from(payload: GridPayload) -> Result<Self, Self::Error> {
        let n = payload.resolution;
        if payload.grid.len() != n || payload.grid.iter().any(|r| r.len() != n) {
            return Err(format!("grid is not {}x{}", n, n));
        }
        Ok(Self {
            mineral: payload.mineral,
            source: payload.source,
            values: payload.grid.into_iter().flatten().collect(),
            resolution: n,
            bounds: payload.bounds,
            legend: payload.legend,
        })
    }
}
