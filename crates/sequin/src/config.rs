//! Configuration types for Sequin diagram styling.
//!
//! [`StyleConfig`] is a deserializable overlay for [`DiagramStyle`]: every
//! field is optional, and unset fields leave the corresponding style value
//! untouched. It implements [`serde::Deserialize`] so hosts can load it
//! from whatever configuration format they use.

use serde::Deserialize;

use sequin_core::{color::Color, geometry::Insets};

use crate::{error::DiagramError, style::DiagramStyle};

/// Deserializable styling overrides for rendered diagrams.
///
/// Colors are given as CSS color strings and parsed when the config is
/// applied, so a bad value surfaces as a [`DiagramError::InvalidArgument`]
/// rather than a deserialization failure.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Minimum gap between adjacent participant labels, in pixels.
    #[serde(default)]
    participant_spacing: Option<f32>,

    /// Vertical gap between rows, in pixels.
    #[serde(default)]
    vertical_spacing: Option<f32>,

    /// Padding around row labels, in pixels.
    #[serde(default)]
    label_padding: Option<f32>,

    /// Uniform padding inside note boxes, in pixels.
    #[serde(default)]
    note_padding: Option<f32>,

    /// Fill color for note boxes, as a color string.
    #[serde(default)]
    note_background: Option<String>,

    /// Canvas background color, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Default line color, as a color string.
    #[serde(default)]
    line_color: Option<String>,

    /// Default line width, in pixels.
    #[serde(default)]
    line_width: Option<f32>,

    /// Whether wrappable labels are balanced toward a square aspect ratio.
    #[serde(default)]
    balance_labels: Option<bool>,

    /// Reading direction: "ltr", "rtl", "left-to-right", or "right-to-left".
    #[serde(default)]
    direction: Option<String>,
}

impl StyleConfig {
    /// Applies the configured overrides on top of `style`.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::InvalidArgument`] if a configured color or
    /// direction string cannot be parsed.
    pub fn apply_to(&self, mut style: DiagramStyle) -> Result<DiagramStyle, DiagramError> {
        if let Some(spacing) = self.participant_spacing {
            style.set_participant_spacing(spacing);
        }
        if let Some(spacing) = self.vertical_spacing {
            style.set_vertical_spacing(spacing);
        }
        if let Some(padding) = self.label_padding {
            style.set_label_padding(padding);
        }
        if let Some(padding) = self.note_padding {
            style.set_note_padding(Insets::uniform(padding));
        }
        if let Some(color) = &self.note_background {
            style.set_note_background(parse_color(color)?);
        }
        if let Some(color) = &self.background_color {
            style.set_background(Some(parse_color(color)?));
        }

        let mut line_style = style.line_style().clone();
        if let Some(color) = &self.line_color {
            line_style = line_style.with_color(parse_color(color)?);
        }
        if let Some(width) = self.line_width {
            line_style = line_style.with_width(width);
        }
        style.set_line_style(line_style);

        if let Some(balance) = self.balance_labels {
            style.set_balance_labels(balance);
        }
        if let Some(direction) = &self.direction {
            let direction = direction
                .parse()
                .map_err(DiagramError::InvalidArgument)?;
            style.set_direction(direction);
        }

        Ok(style)
    }
}

fn parse_color(value: &str) -> Result<Color, DiagramError> {
    Color::new(value).map_err(DiagramError::InvalidArgument)
}
