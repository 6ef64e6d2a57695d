//! Common types and utilities shared across the mineral analysis crates.

pub mod bbox;
pub mod error;
pub mod geotransform;
pub mod legend;
pub mod mineral;
pub mod raster;

pub use bbox::BoundingBox;
pub use error::{MineralError, MineralResult};
pub use geotransform::GeoTransform;
pub use legend::{Color, Legend, LegendBand};
pub use mineral::{DepthRange, MineralType};
pub use raster::{sample_count, BandSet, Raster};
