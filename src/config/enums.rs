//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "black"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: black, red, green, blue, yellow, magenta, cyan, orange, white
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Named colors map to the quick-palette constants; unknown names default
    /// to black with a warning. RGB arrays convert from 0-255 to 0.0-1.0 with
    /// full opacity.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => Color::from_name(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using black", name);
                BLACK
            }),
            ColorSpec::Rgb([r, g, b]) => Color {
                r: f64::from(*r) / 255.0,
                g: f64::from(*g) / 255.0,
                b: f64::from(*b) / 255.0,
                a: 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_color_resolves_to_palette_constant() {
        assert_eq!(ColorSpec::Name("orange".into()).to_color(), ORANGE);
    }

    #[test]
    fn unknown_name_falls_back_to_black() {
        assert_eq!(ColorSpec::Name("mauve".into()).to_color(), BLACK);
    }

    #[test]
    fn rgb_array_scales_to_unit_range() {
        let color = ColorSpec::Rgb([255, 0, 51]).to_color();
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 0.2).abs() < 1e-9);
        assert_eq!(color.a, 1.0);
    }
}
