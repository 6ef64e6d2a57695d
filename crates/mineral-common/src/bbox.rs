//! Geographic area-of-interest bounding box.

use serde::{Deserialize, Serialize};

use crate::error::{MineralError, MineralResult};

/// A geographic bounding box in WGS84 degrees.
///
/// Field names follow the request layer (`lat_min`, `lat_max`, ...), so the
/// struct serializes directly as the `heatmap_bounds` payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Reject boxes that are inverted, empty or contain non-finite edges.
    pub fn validate(&self) -> MineralResult<()> {
        let edges = [self.lat_min, self.lat_max, self.lon_min, self.lon_max];
        if edges.iter().any(|v| !v.is_finite()) {
            return Err(MineralError::InvalidBoundingBox(
                "coordinates must be finite".to_string(),
            ));
        }
        if self.lat_min >= self.lat_max {
            return Err(MineralError::InvalidBoundingBox(format!(
                "lat_min {} must be below lat_max {}",
                self.lat_min, self.lat_max
            )));
        }
        if self.lon_min >= self.lon_max {
            return Err(MineralError::InvalidBoundingBox(format!(
                "lon_min {} must be below lon_max {}",
                self.lon_min, self.lon_max
            )));
        }
        if self.lat_min < -90.0 || self.lat_max > 90.0 {
            return Err(MineralError::InvalidBoundingBox(
                "latitude outside [-90, 90]".to_string(),
            ));
        }
        Ok(())
    }

    /// Width in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Height in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.lon_min < other.lon_max
            && self.lon_max > other.lon_min
            && self.lat_min < other.lat_max
            && self.lat_max > other.lat_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let a = BoundingBox::new(0.0, 10.0, 0.0, 10.0);
        let b = BoundingBox::new(5.0, 15.0, 5.0, 15.0);
        let c = BoundingBox::new(20.0, 30.0, 20.0, 30.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_validate_rejects_inverted() {
        assert!(BoundingBox::new(41.0, 40.0, -116.0, -115.0).validate().is_err());
        assert!(BoundingBox::new(40.0, 41.0, -115.0, -116.0).validate().is_err());
        assert!(BoundingBox::new(40.0, 41.0, -116.0, -115.0).validate().is_ok());
    }
}
