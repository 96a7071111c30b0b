//! Text styling and measurement.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable font configuration for labels.
//! - [`TextMeasurer`] - Measures text with real font metrics via `cosmic-text`.
//!
//! Measurement uses full shaping (ligatures, kerning), so widths match what
//! an SVG renderer with the same font will produce far more closely than a
//! per-character estimate would.

use std::sync::Mutex;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

use crate::{color::Color, geometry::Size};

/// Conversion from font points to pixels at standard DPI.
const PX_PER_POINT: f32 = 1.33;

/// Line height as a fraction of the pixel font size.
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Defines the visual style for text elements in diagrams.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Helvetica"` |
/// | Font size | `14` |
/// | Text color | `None` (SVG default, typically black) |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family for the text.
    ///
    /// # Arguments
    ///
    /// * `family` - The font family name (e.g., "Arial", "Times New Roman", "monospace")
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the text color.
    ///
    /// When set to `None`, the default text color (usually black) is used.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Returns the font size in points.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Returns the font family name.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Returns the text color, if set.
    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    /// Returns the pixel height of one rendered line in this style.
    pub fn line_height(&self) -> f32 {
        self.font_size as f32 * PX_PER_POINT * LINE_HEIGHT_FACTOR
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Helvetica".to_string(),
            font_size: 14,
            color: None,
        }
    }
}

/// Measures text using real font metrics.
///
/// Maintains a reusable [`FontSystem`] instance behind a mutex, since font
/// discovery is expensive and `cosmic-text` requires mutable access while
/// shaping. A single `TextMeasurer` can be shared across threads.
pub struct TextMeasurer {
    font_system: Mutex<FontSystem>,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer {
    /// Creates a new measurer with a freshly loaded font system.
    pub fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Calculates the rendered size of `text` in pixels.
    ///
    /// When `max_width` is given, the text is wrapped at word boundaries to
    /// fit and the returned height accounts for the extra lines. Explicit
    /// `\n` characters always start a new line.
    ///
    /// # Arguments
    ///
    /// * `text` - The text content to measure
    /// * `definition` - Font family and size to measure with
    /// * `max_width` - Optional wrapping width in pixels
    pub fn measure(
        &self,
        text: &str,
        definition: &TextDefinition,
        max_width: Option<f32>,
    ) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        let font_size_px = definition.font_size() as f32 * PX_PER_POINT;
        let line_height = font_size_px * LINE_HEIGHT_FACTOR;
        let metrics = Metrics::new(font_size_px, line_height);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(definition.font_family()));

        // Height is left unbounded so the text flows into as many lines as
        // the wrapping width demands.
        buffer.set_size(max_width, None);

        // Advanced shaping handles ligatures, kerning, etc.
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut measured_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if layout_runs.is_empty() {
            // No shapable glyphs (e.g. no fonts available); fall back to a
            // character-count estimate.
            measured_width = text.len() as f32 * (font_size_px * 0.55);
            total_height = metrics.line_height;
        } else {
            for run in &layout_runs {
                if let Some(last) = run.glyphs.last() {
                    measured_width = measured_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        }

        Size::new(measured_width, total_height)
    }

    /// Returns the natural single-paragraph width of `text`: the width it
    /// takes with wrapping disabled.
    pub fn max_intrinsic_width(&self, text: &str, definition: &TextDefinition) -> f32 {
        self.measure(text, definition, None).width()
    }

    /// Returns the narrowest width `text` can wrap into without breaking
    /// words, i.e. the width of its longest word.
    pub fn min_intrinsic_width(&self, text: &str, definition: &TextDefinition) -> f32 {
        // Measuring against a near-zero wrapping width forces a break at
        // every word boundary; the widest resulting run is the longest word.
        self.measure(text, definition, Some(1.0)).width()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::new();
        assert_eq!(def.font_size(), 14);
        assert_eq!(def.font_family(), "Helvetica");
        assert!(def.color().is_none());
    }

    #[test]
    fn test_text_definition_setters() {
        let mut def = TextDefinition::new();

        def.set_font_size(24);
        assert_eq!(def.font_size(), 24);

        def.set_font_family("monospace");
        assert_eq!(def.font_family(), "monospace");

        def.set_color(Some(Color::new("navy").unwrap()));
        assert!(def.color().is_some());
    }

    #[test]
    fn test_text_definition_line_height_scales_with_font_size() {
        let mut small = TextDefinition::new();
        small.set_font_size(10);
        let mut large = TextDefinition::new();
        large.set_font_size(20);

        assert_approx_eq!(f32, large.line_height(), small.line_height() * 2.0);
    }

    #[test]
    fn test_measure_empty_is_zero() {
        let measurer = TextMeasurer::new();
        let size = measurer.measure("", &TextDefinition::new(), None);
        assert_approx_eq!(f32, size.width(), 0.0);
        assert_approx_eq!(f32, size.height(), 0.0);
    }

    #[test]
    fn test_measure_single_line_positive() {
        let measurer = TextMeasurer::new();
        let size = measurer.measure("Hello World", &TextDefinition::new(), None);
        assert!(size.width() > 0.0, "width should be positive");
        assert!(size.height() > 0.0, "height should be positive");
    }

    #[test]
    fn test_measure_multiline_taller() {
        let measurer = TextMeasurer::new();
        let def = TextDefinition::new();

        let single = measurer.measure("request", &def, None);
        let multi = measurer.measure("request\nresponse\nack", &def, None);

        assert!(
            multi.height() > single.height(),
            "multi-line ({}) should be taller than single line ({})",
            multi.height(),
            single.height()
        );
    }

    #[test]
    fn test_measure_longer_text_wider() {
        let measurer = TextMeasurer::new();
        let def = TextDefinition::new();

        let short = measurer.measure("ok", &def, None);
        let long = measurer.measure("a considerably longer message", &def, None);

        assert!(long.width() > short.width());
    }

    #[test]
    fn test_measure_larger_font_larger_size() {
        let measurer = TextMeasurer::new();

        let mut small_def = TextDefinition::new();
        small_def.set_font_size(10);
        let mut large_def = TextDefinition::new();
        large_def.set_font_size(28);

        let small = measurer.measure("query", &small_def, None);
        let large = measurer.measure("query", &large_def, None);

        assert!(large.width() > small.width());
        assert!(large.height() > small.height());
    }

    #[test]
    fn test_intrinsic_widths_ordered() {
        let measurer = TextMeasurer::new();
        let def = TextDefinition::new();
        let text = "wraps across several words";

        let min = measurer.min_intrinsic_width(text, &def);
        let max = measurer.max_intrinsic_width(text, &def);

        assert!(min > 0.0);
        assert!(min <= max);
    }
}
