//! Colors and the fixed four-band potential legend.

use serde::{Deserialize, Serialize};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

}

/// One contiguous value range of the legend.
///
/// Ranges are half-open `[min, max)` except the last, which is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendBand {
    pub min: f32,
    pub max: f32,
    pub color: Color,
    pub label: String,
}

/// Value-to-color legend over normalized [0, 1] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub bands: Vec<LegendBand>,
}

impl Legend {
    /// The fixed potential legend shared by the grid payload and the
    /// heatmap renderer.
    pub fn potential() -> Self {
        let band = |min: f32, max: f32, color: Color, label: &str| LegendBand {
            min,
            max,
            color,
            label: label.to_string(),
        };

        Self {
            bands: vec![
                band(0.0, 0.25, Color::rgb(255, 255, 153), "Low"),
                band(0.25, 0.5, Color::rgb(255, 255, 0), "Moderate"),
                band(0.5, 0.75, Color::rgb(255, 165, 0), "High"),
                band(0.75, 1.0, Color::rgb(255, 0, 0), "Very High"),
            ],
        }
    }

    /// Index of the band a normalized value falls into.
    ///
    /// Values are clamped into the legend's span first; NaN maps to the
    /// lowest band.
    pub fn band_index(&self, value: f32) -> usize {
        let Some(first) = self.bands.first() else {
            return 0;
        };
        let last_idx = self.bands.len() - 1;
        let hi = self.bands[last_idx].max;

        let v = if value.is_nan() {
            first.min
        } else {
            value.clamp(first.min, hi)
        };

        self.bands
            .iter()
            .position(|b| v >= b.min && v < b.max)
            .unwrap_or(last_idx)
    }

    /// Palette in band order.
    pub fn palette(&self) -> Vec<Color> {
        self.bands.iter().map(|b| b.color).collect()
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self::potential()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        let legend = Legend::potential();
        assert_eq!(legend.band_index(0.0), 0);
        assert_eq!(legend.band_index(0.2499), 0);
        assert_eq!(legend.band_index(0.25), 1);
        assert_eq!(legend.band_index(0.5), 2);
        assert_eq!(legend.band_index(0.75), 3);
        assert_eq!(legend.band_index(1.0), 3);
    }

    #[test]
    fn test_out_of_range_clamped() {
        let legend = Legend::potential();
        assert_eq!(legend.band_index(-3.0), 0);
        assert_eq!(legend.band_index(7.0), 3);
        assert_eq!(legend.band_index(f32::NAN), 0);
        assert_eq!(legend.band_index(f32::INFINITY), 3);
    }

    #[test]
    fn test_colors_match_legend_table() {
        let palette = Legend::potential().palette();
        assert_eq!(
            palette,
            vec![
                Color::rgb(255, 255, 153),
                Color::rgb(255, 255, 0),
                Color::rgb(255, 165, 0),
                Color::rgb(255, 0, 0),
            ]
        );
    }

    #[test]
    fn test_alpha_defaults_to_opaque() {
        let c: Color = serde_json::from_str(r#"{"r": 255, "g": 165, "b": 0}"#).unwrap();
        assert_eq!(c, Color::rgb(255, 165, 0));
        assert_eq!(c.a, 255);
    }
}
