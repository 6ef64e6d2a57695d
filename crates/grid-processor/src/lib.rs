//! Display grid generation.
//!
//! Turns a per-pixel index or score raster into a fixed N×N grid over an
//! area of interest, suitable for a heatmap overlay:
//!
//! ```text
//! MineralIndices / PotentialScores
//!      │
//!      ▼
//! proxy::combine(GridSource)          one raster per commodity
//!      │
//!      ▼
//! aggregate::aggregate_area_max       max of every pixel under each cell
//!      │
//!      ▼
//! aggregate::normalize_grid           min/max rescale of positive cells
//!      │
//!      ▼
//! DisplayGrid { values, bounds, resolution, legend }
//! ```
//!
//! Cells are taken by area, not by point sampling, so an anomaly smaller
//! than a cell still lights up the cell that contains it.

pub mod aggregate;
pub mod config;
pub mod proxy;
pub mod types;

pub use aggregate::{aggregate_area_max, build_display_grid, cell_pixel_window, normalize_grid};
pub use config::{GridConfig, DEFAULT_GRID_RESOLUTION, MAX_GRID_RESOLUTION};
pub use proxy::{combine, copper_proxy, ferrous_proxy, gold_proxy, GridSource};
pub use types::{DisplayGrid, PixelWindow};
