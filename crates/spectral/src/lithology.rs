//! Rock-type indicators normalized by their scene-wide maximum.

use mineral_common::{BandSet, Raster};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Granite, rhyolite and basalt indicators in [0, 1].
#[derive(Debug, Clone)]
pub struct LithologyIndices {
    pub granite: Raster,
    pub rhyolite: Raster,
    pub basalt: Raster,
}

/// Divide every sample by the largest finite sample and clip to [0, 1].
///
/// Non-finite results become 0. A raster whose finite maximum is missing
/// or zero yields all zeros. A negative maximum still divides, so samples
/// at or below it clip to 1.
pub fn normalize_by_max(raw: &Raster, name: &str) -> Raster {
    let max = match raw.max_finite() {
        Some(m) if m != 0.0 => m,
        other => {
            warn!(indicator = name, max = ?other, "Degenerate lithology maximum, using zeros");
            return raw.with_data(vec![0.0; raw.len()]);
        }
    };

    let data = raw
        .data
        .par_iter()
        .map(|&v| {
            let n = (v / max).clamp(0.0, 1.0);
            if n.is_nan() {
                0.0
            } else {
                n
            }
        })
        .collect();
    raw.with_data(data)
}

fn raw_ratio<F>(bands: &BandSet, f: F) -> Raster
where
    F: Fn(usize) -> f32 + Sync,
{
    let data: Vec<f32> = (0..bands.red.len())
        .into_par_iter()
        .map(|i| f(i))
        .collect();
    bands.red.with_data(data)
}

/// Classify lithology from the raw bands.
///
/// Unlike the mineral indices, bands are used as-is: zero denominators
/// produce non-finite ratios that are excluded from the maximum and mapped
/// to 0 (or clipped to 1 for +inf).
pub fn classify_lithology(bands: &BandSet) -> LithologyIndices {
    let (red, nir, swir1, swir2) = (
        &bands.red.data,
        &bands.nir.data,
        &bands.swir1.data,
        &bands.swir2.data,
    );
    debug!("Classifying lithology");

    let granite = raw_ratio(bands, |i| (swir2[i] / swir1[i]) * (nir[i] / red[i]));
    let rhyolite = raw_ratio(bands, |i| swir1[i] / red[i]);
    let basalt = raw_ratio(bands, |i| red[i] / nir[i]);

    LithologyIndices {
        granite: normalize_by_max(&granite, "granite"),
        rhyolite: normalize_by_max(&rhyolite, "rhyolite"),
        basalt: normalize_by_max(&basalt, "basalt"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_by_max() {
        let raw = Raster::new(vec![1.0, 2.0, 4.0, f32::NAN], 2, 2).unwrap();
        let n = normalize_by_max(&raw, "test");
        assert_eq!(n.data, vec![0.25, 0.5, 1.0, 0.0]);
    }

    #[test]
    fn test_infinite_sample_excluded_from_max() {
        let raw = Raster::new(vec![1.0, 2.0, f32::INFINITY, 0.5], 2, 2).unwrap();
        let n = normalize_by_max(&raw, "test");
        assert_eq!(n.data, vec![0.5, 1.0, 1.0, 0.25]);
    }

    #[test]
    fn test_zero_max_gives_zeros() {
        let raw = Raster::filled(0.0, 3, 3);
        assert!(normalize_by_max(&raw, "test").data.iter().all(|&v| v == 0.0));

        let nan = Raster::filled(f32::NAN, 3, 3);
        assert!(normalize_by_max(&nan, "test").data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_negative_samples_clip_to_zero() {
        let raw = Raster::new(vec![-1.0, 2.0], 2, 1).unwrap();
        assert_eq!(normalize_by_max(&raw, "test").data, vec![0.0, 1.0]);
    }

    #[test]
    fn test_negative_max_still_divides() {
        // max is -0.5: -1.0 / -0.5 = 2.0 clips to 1.0
        let raw = Raster::new(vec![-1.0, -0.5], 2, 1).unwrap();
        assert_eq!(normalize_by_max(&raw, "test").data, vec![1.0, 1.0]);

        let mixed = Raster::new(vec![-4.0, -1.0, f32::NAN, f32::INFINITY], 2, 2).unwrap();
        assert_eq!(normalize_by_max(&mixed, "test").data, vec![1.0, 1.0, 0.0, 0.0]);
    }
}
