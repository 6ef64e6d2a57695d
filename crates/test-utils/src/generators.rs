//! Test data generators for creating synthetic reflectance bands.
//!
//! These generators create predictable, verifiable patterns that can be
//! used across the test suite. Nothing here is random.

use mineral_common::{BandSet, GeoTransform, Raster};

use crate::fixtures::unit_degree_transform;

/// Creates a test raster with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// # Example
///
/// ```
/// use test_utils::create_test_raster;
///
/// let r = create_test_raster(10, 5);
/// assert_eq!(r.len(), 50);
/// assert_eq!(r.data[1], 1000.0);  // col=1, row=0
/// assert_eq!(r.data[10], 1.0);    // col=0, row=1
/// ```
pub fn create_test_raster(width: usize, height: usize) -> Raster {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    Raster {
        data,
        width,
        height,
    }
}

/// Four constant bands over a `width` x `height` raster.
///
/// Uses the 1x1 degree fixture transform scaled to the raster size.
pub fn constant_bands(
    width: usize,
    height: usize,
    red: f32,
    nir: f32,
    swir1: f32,
    swir2: f32,
) -> BandSet {
    let transform = GeoTransform::north_up(-117.0, 41.0, 1.0 / width as f64, -1.0 / height as f64);
    constant_bands_with_transform(width, height, [red, nir, swir1, swir2], transform)
}

/// Four constant bands with an explicit transform.
pub fn constant_bands_with_transform(
    width: usize,
    height: usize,
    values: [f32; 4],
    transform: GeoTransform,
) -> BandSet {
    let [red, nir, swir1, swir2] = values;
    BandSet::new(
        Raster::filled(red, width, height),
        Raster::filled(nir, width, height),
        Raster::filled(swir1, width, height),
        Raster::filled(swir2, width, height),
        transform,
    )
    .expect("constant bands share one shape")
}

/// The reference reflectance scene: red=2000, nir=3000, swir1=2500, swir2=2000.
pub fn reference_bands(width: usize, height: usize) -> BandSet {
    constant_bands(width, height, 2000.0, 3000.0, 2500.0, 2000.0)
}

/// 10x10 background scene with a 2x2 block of strongly altered pixels at
/// rows 2-3, cols 6-7.
///
/// The anomaly has high NIR/red (potassic) and high SWIR1/SWIR2 (clay), so
/// it scores far above the background for copper.
pub fn anomaly_bands() -> BandSet {
    let (width, height) = (10, 10);
    let mut red = vec![2000.0f32; width * height];
    let mut nir = vec![2200.0f32; width * height];
    let mut swir1 = vec![2100.0f32; width * height];
    let mut swir2 = vec![2100.0f32; width * height];

    for row in 2..4 {
        for col in 6..8 {
            let i = row * width + col;
            red[i] = 1000.0;
            nir[i] = 3000.0;
            swir1[i] = 3600.0;
            swir2[i] = 1800.0;
        }
    }

    BandSet::new(
        Raster { data: red, width, height },
        Raster { data: nir, width, height },
        Raster { data: swir1, width, height },
        Raster { data: swir2, width, height },
        unit_degree_transform(),
    )
    .expect("anomaly bands share one shape")
}

/// Raster whose values increase left to right from 0 to `max`.
pub fn horizontal_gradient(width: usize, height: usize, max: f32) -> Raster {
    let mut data = Vec::with_capacity(width * height);
    for _row in 0..height {
        for col in 0..width {
            let t = if width > 1 {
                col as f32 / (width - 1) as f32
            } else {
                0.0
            };
            data.push(t * max);
        }
    }
    Raster {
        data,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_raster() {
        let r = create_test_raster(5, 3);
        assert_eq!(r.len(), 15);
        assert_eq!(r.get(2, 4), Some(4002.0));
    }

    #[test]
    fn test_anomaly_location() {
        let bands = anomaly_bands();
        assert_eq!(bands.red.get(2, 6), Some(1000.0));
        assert_eq!(bands.red.get(4, 6), Some(2000.0));
    }

    #[test]
    fn test_horizontal_gradient() {
        let g = horizontal_gradient(5, 2, 100.0);
        assert_eq!(g.get(0, 0), Some(0.0));
        assert_eq!(g.get(1, 4), Some(100.0));
        assert_eq!(g.get(1, 2), Some(50.0));
    }
}
