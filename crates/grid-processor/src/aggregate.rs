//! Area-max aggregation onto the display grid, and grid normalization.
//!
//! Each grid cell covers an equal geographic rectangle of the area of
//! interest. The cell's corners are pushed through the inverse geotransform,
//! the resulting pixel rectangle is clamped to the raster and widened by one
//! pixel on its far edges, and the cell takes the largest finite sample
//! inside it.

use mineral_common::{BoundingBox, GeoTransform, Legend, MineralResult, MineralType, Raster};
use rayon::prelude::*;
use spectral::{MineralIndices, PotentialScores};
use tracing::{debug, warn};

use crate::config::GridConfig;
use crate::proxy::{combine, GridSource};
use crate::types::{DisplayGrid, PixelWindow};

/// Pixel rectangle under grid cell (`row`, `col`).
///
/// Row 0 is the northern edge of `bbox`. Returns `None` when a corner cannot
/// be mapped back to pixel space; the window may be empty when the cell lies
/// outside the raster.
pub fn cell_pixel_window(
    transform: &GeoTransform,
    bbox: &BoundingBox,
    resolution: usize,
    row: usize,
    col: usize,
    raster_height: usize,
    raster_width: usize,
) -> Option<PixelWindow> {
    let n = resolution as f64;
    let cell_lon = bbox.width() / n;
    let cell_lat = bbox.height() / n;

    let north = bbox.lat_max - row as f64 * cell_lat;
    let south = bbox.lat_max - (row + 1) as f64 * cell_lat;
    let west = bbox.lon_min + col as f64 * cell_lon;
    let east = bbox.lon_min + (col + 1) as f64 * cell_lon;

    let corners = [
        transform.geo_to_pixel(west, north)?,
        transform.geo_to_pixel(east, north)?,
        transform.geo_to_pixel(west, south)?,
        transform.geo_to_pixel(east, south)?,
    ];

    let (mut col_min, mut col_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut row_min, mut row_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for (c, r) in corners {
        col_min = col_min.min(c);
        col_max = col_max.max(c);
        row_min = row_min.min(r);
        row_max = row_max.max(r);
    }

    let clamp = |v: f64, hi: usize| v.max(0.0).min(hi as f64) as usize;

    Some(PixelWindow {
        row_start: clamp(row_min.floor(), raster_height),
        row_end: clamp(row_max.floor() + 1.0, raster_height),
        col_start: clamp(col_min.floor(), raster_width),
        col_end: clamp(col_max.floor() + 1.0, raster_width),
    })
}

/// Largest finite sample inside `window`, or 0 when there is none.
fn window_max(raster: &Raster, window: &PixelWindow) -> f32 {
    let mut max = f32::NEG_INFINITY;
    for row in window.row_start..window.row_end {
        let start = row * raster.width;
        for &v in &raster.data[start + window.col_start..start + window.col_end] {
            if v.is_finite() && v > max {
                max = v;
            }
        }
    }

    if max.is_finite() {
        max
    } else {
        0.0
    }
}

/// Raw (unnormalized) cell values, row-major, row 0 north.
pub fn aggregate_area_max(
    raster: &Raster,
    transform: &GeoTransform,
    bbox: &BoundingBox,
    resolution: usize,
) -> Vec<f32> {
    let mut cells = vec![0.0f32; resolution * resolution];
    if resolution == 0 {
        return cells;
    }

    cells
        .par_chunks_mut(resolution)
        .enumerate()
        .for_each(|(row, out_row)| {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = match cell_pixel_window(
                    transform,
                    bbox,
                    resolution,
                    row,
                    col,
                    raster.height,
                    raster.width,
                ) {
                    Some(window) if !window.is_empty() => window_max(raster, &window),
                    _ => 0.0,
                };
            }
        });

    cells
}

/// Rescale the finite, positive cells to [0, 1] in place.
///
/// With `m`/`M` the min/max of those cells, each becomes `(v - m) / (M - m)`,
/// or exactly 1.0 when `M == m`. All other cells become 0.
pub fn normalize_grid(values: &mut [f32]) {
    let qualifies = |v: f32| v.is_finite() && v > 0.0;

    let (min, max) = values
        .iter()
        .copied()
        .filter(|&v| qualifies(v))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() {
        values.iter_mut().for_each(|v| *v = 0.0);
        return;
    }

    let range = max - min;
    for v in values.iter_mut() {
        *v = if !qualifies(*v) {
            0.0
        } else if range > 0.0 {
            ((*v - min) / range).clamp(0.0, 1.0)
        } else {
            1.0
        };
    }
}

/// Aggregate and normalize `raster` into a display grid.
pub fn build_display_grid(
    mineral: MineralType,
    source: GridSource,
    raster: &Raster,
    transform: &GeoTransform,
    bbox: &BoundingBox,
    config: &GridConfig,
) -> MineralResult<DisplayGrid> {
    config.validate()?;
    bbox.validate()?;

    let footprint = transform.bounds(raster.height, raster.width);
    if !footprint.intersects(bbox) {
        warn!(
            mineral = %mineral,
            ?bbox,
            ?footprint,
            "Area of interest does not overlap the raster, grid will be empty"
        );
    }

    let mut values = aggregate_area_max(raster, transform, bbox, config.resolution);
    normalize_grid(&mut values);

    let grid = DisplayGrid {
        mineral,
        source,
        values,
        resolution: config.resolution,
        bounds: *bbox,
        legend: Legend::potential(),
    };

    debug!(
        mineral = %mineral,
        source = %source,
        resolution = grid.resolution,
        active_cells = grid.active_cells(),
        "Built display grid"
    );

    Ok(grid)
}

/// Build the display grid for one commodity from the configured source.
pub fn grid_for_mineral(
    mineral: MineralType,
    indices: &MineralIndices,
    scores: &PotentialScores,
    transform: &GeoTransform,
    bbox: &BoundingBox,
    config: &GridConfig,
) -> MineralResult<DisplayGrid> {
    let source = match mineral {
        MineralType::Copper => config.copper_source,
        MineralType::Gold => config.gold_source,
    };
    let raster = combine(source, indices, scores);
    build_display_grid(mineral, source, &raster, transform, bbox, config)
}
