//! Image rendering for mineral potential data.
//!
//! - Legend bucketing of normalized grids and percent score arrays
//! - Indexed PNG encoding

pub mod heatmap;
pub mod png;

pub use heatmap::{bucket_indices, render_heatmap, Heatmap, ValueScale};
pub use png::create_png_indexed;
