//! Color handling for diagram styling.
//!
//! Wraps the `color` crate's [`DynamicColor`] so the rest of the codebase
//! can parse CSS color strings ("#ff0000", "rgb(255, 0, 0)", "red", ...)
//! and hand them straight to SVG attributes.

use std::str::FromStr;

use color::DynamicColor;

/// A parsed CSS color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string such as "#ff0000", "rgb(255, 0, 0)", or "red".
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Color { color }),
            Err(err) => Err(format!("Invalid color '{color_str}': {err}")),
        }
    }

    /// Returns the alpha component in the range `0.0..=1.0`.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    /// Opaque black.
    fn default() -> Self {
        Self::new("black").unwrap()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        svg::node::Value::from(color.to_string())
    }
}
