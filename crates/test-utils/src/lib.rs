//! Shared test utilities for the mineral analysis workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Band and raster generators with predictable values
//! - Common area-of-interest and geotransform fixtures
//! - Approximate float assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{constant_bands, fixtures, assert_approx_eq};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert every sample of a raster lies in `[lo, hi]` and is finite.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_raster_in_range;
///
/// assert_raster_in_range!(indices.clay, 0.0, 2.0);
/// ```
#[macro_export]
macro_rules! assert_raster_in_range {
    ($raster:expr, $lo:expr, $hi:expr) => {{
        let lo: f32 = $lo as f32;
        let hi: f32 = $hi as f32;
        for (i, &v) in $raster.data.iter().enumerate() {
            if !v.is_finite() || v < lo || v > hi {
                panic!(
                    "assertion failed: sample {} = {:?} not in [{:?}, {:?}]",
                    i, v, lo, hi
                );
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use mineral_common::Raster;

    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_raster_in_range_passes() {
        let r = Raster::filled(0.5, 2, 2);
        assert_raster_in_range!(r, 0.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "not in")]
    fn test_assert_raster_in_range_rejects_nan() {
        let r = Raster::filled(f32::NAN, 2, 2);
        assert_raster_in_range!(r, 0.0, 1.0);
    }
}
