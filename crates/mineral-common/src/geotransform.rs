//! Affine pixel <-> geographic coordinate mapping.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;

/// Six-coefficient affine transform in GDAL order.
///
/// ```text
/// lon = origin_x + col * pixel_width + row * row_rotation
/// lat = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// `(origin_x, origin_y)` is the outer corner of pixel (0, 0). For a
/// north-up raster `pixel_height` is negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct GeoTransform {
    pub origin_x: f64,
    pub pixel_width: f64,
    pub row_rotation: f64,
    pub origin_y: f64,
    pub col_rotation: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    /// North-up transform without rotation terms.
    pub fn north_up(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            pixel_width,
            row_rotation: 0.0,
            origin_y,
            col_rotation: 0.0,
            pixel_height,
        }
    }

    /// Transform that stretches a `width` x `height` raster over `bbox`,
    /// with row 0 on the northern edge.
    pub fn fit_to_bbox(bbox: &BoundingBox, width: usize, height: usize) -> Self {
        Self::north_up(
            bbox.lon_min,
            bbox.lat_max,
            bbox.width() / width.max(1) as f64,
            -bbox.height() / height.max(1) as f64,
        )
    }

    pub fn from_gdal(coeffs: [f64; 6]) -> Self {
        Self {
            origin_x: coeffs[0],
            pixel_width: coeffs[1],
            row_rotation: coeffs[2],
            origin_y: coeffs[3],
            col_rotation: coeffs[4],
            pixel_height: coeffs[5],
        }
    }

    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.col_rotation,
            self.pixel_height,
        ]
    }

    /// Geographic position (lon, lat) of a fractional pixel coordinate.
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        let lon = self.origin_x + col * self.pixel_width + row * self.row_rotation;
        let lat = self.origin_y + col * self.col_rotation + row * self.pixel_height;
        (lon, lat)
    }

    /// Center of pixel (row, col) as (lon, lat).
    pub fn pixel_center(&self, row: usize, col: usize) -> (f64, f64) {
        self.apply(col as f64 + 0.5, row as f64 + 0.5)
    }

    /// Fractional (col, row) of a geographic point.
    ///
    /// Returns `None` when the transform is singular or the input is not
    /// finite. Callers floor the result to get pixel indices.
    pub fn geo_to_pixel(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        let det = self.determinant();
        if det.abs() < 1e-18 || !lon.is_finite() || !lat.is_finite() {
            return None;
        }

        let dx = lon - self.origin_x;
        let dy = lat - self.origin_y;

        let col = (self.pixel_height * dx - self.row_rotation * dy) / det;
        let row = (-self.col_rotation * dx + self.pixel_width * dy) / det;

        if col.is_finite() && row.is_finite() {
            Some((col, row))
        } else {
            None
        }
    }

    /// Integer pixel (row, col) containing a geographic point, if the point
    /// falls inside a raster of the given shape.
    pub fn geo_to_index(&self, lon: f64, lat: f64, height: usize, width: usize) -> Option<(usize, usize)> {
        let (col, row) = self.geo_to_pixel(lon, lat)?;
        let (col, row) = (col.floor(), row.floor());
        if col < 0.0 || row < 0.0 || col >= width as f64 || row >= height as f64 {
            return None;
        }
        Some((row as usize, col as usize))
    }

    pub fn determinant(&self) -> f64 {
        self.pixel_width * self.pixel_height - self.row_rotation * self.col_rotation
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant().abs() >= 1e-18 && self.to_gdal().iter().all(|c| c.is_finite())
    }

    /// Geographic footprint of a raster with this transform.
    pub fn bounds(&self, height: usize, width: usize) -> BoundingBox {
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(width as f64, 0.0),
            self.apply(0.0, height as f64),
            self.apply(width as f64, height as f64),
        ];

        let mut bbox = BoundingBox::new(
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        );
        for (lon, lat) in corners {
            bbox.lon_min = bbox.lon_min.min(lon);
            bbox.lon_max = bbox.lon_max.max(lon);
            bbox.lat_min = bbox.lat_min.min(lat);
            bbox.lat_max = bbox.lat_max.max(lat);
        }
        bbox
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::north_up(0.0, 0.0, 1.0, -1.0)
    }
}

impl From<[f64; 6]> for GeoTransform {
    fn from(coeffs: [f64; 6]) -> Self {
        Self::from_gdal(coeffs)
    }
}

impl From<GeoTransform> for [f64; 6] {
    fn from(gt: GeoTransform) -> Self {
        gt.to_gdal()
    }
}
