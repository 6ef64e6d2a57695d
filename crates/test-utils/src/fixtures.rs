//! Common test fixtures for mineral analysis tests.
//!
//! This module provides pre-defined areas of interest and geotransforms
//! that show up across the test suite.

use mineral_common::{BoundingBox, GeoTransform};

/// Common area-of-interest definitions for testing.
pub mod aoi {
    use super::BoundingBox;

    /// Carlin Trend, Nevada (the service default)
    pub fn carlin() -> BoundingBox {
        BoundingBox::new(40.97, 40.99, -116.39, -116.38)
    }

    /// A 1x1 degree box with round numbers, handy for exact cell maths
    pub fn unit_degree() -> BoundingBox {
        BoundingBox::new(40.0, 41.0, -117.0, -116.0)
    }

    /// Far away from every other fixture
    pub fn antipode() -> BoundingBox {
        BoundingBox::new(-41.0, -40.0, 63.0, 64.0)
    }
}

/// North-up transform with `pixel_deg` square pixels whose (0, 0) corner
/// sits at the north-west corner of `bbox`.
pub fn transform_for(bbox: &BoundingBox, pixel_deg: f64) -> GeoTransform {
    GeoTransform::north_up(bbox.lon_min, bbox.lat_max, pixel_deg, -pixel_deg)
}

/// Transform covering the 1x1 degree fixture with a 10x10 raster.
pub fn unit_degree_transform() -> GeoTransform {
    transform_for(&aoi::unit_degree(), 0.1)
}
