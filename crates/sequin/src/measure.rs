//! Content measurement.
//!
//! The layout engine never inspects label text itself; it sees opaque
//! content values of some type `C` and asks a [`Measurer`] how big they
//! are. This keeps the solver independent of any particular text stack:
//!
//! - [`TextMeasurer`] (re-exported from `sequin-core`) measures [`Label`]s
//!   with real font metrics via `cosmic-text`.
//! - [`MonospaceMeasurer`] measures [`Label`]s with a fixed character
//!   grid. It is fully deterministic and font-independent, which makes it
//!   the measurer of choice for tests and headless environments.
//! - [`StyleDefaults`] fills a label's unset padding and font from the
//!   diagram style; the layout engine resolves every content through it
//!   before measuring.

use sequin_core::{
    draw::{TextDefinition, TextMeasurer},
    geometry::{Constraints, Insets, Size},
};

use crate::style::DiagramStyle;

/// Measures opaque content values for the layout engine.
///
/// Mirrors the contract of intrinsic-measurement layout systems:
/// `measure` must return a size satisfying the given [`Constraints`],
/// while the intrinsic widths report how narrow and how wide the content
/// could usefully be.
pub trait Measurer<C> {
    /// Measures `content` under `constraints`, returning a size within them.
    fn measure(&mut self, content: &C, constraints: Constraints) -> Size;

    /// The narrowest width the content can wrap into without clipping.
    fn min_intrinsic_width(&mut self, content: &C) -> f32;

    /// The width the content takes when wrapping is not forced on it.
    fn max_intrinsic_width(&mut self, content: &C) -> f32;
}

/// Content whose unset styling falls back to the diagram style.
///
/// The layout engine resolves every content value through this trait
/// before measuring, so measurers and renderers always see concrete
/// padding and fonts. Mirrors how [`LineStyle`](crate::style::LineStyle)
/// merges row styles onto the diagram default.
pub trait StyleDefaults {
    /// Returns a copy with every unset styling field filled from `style`.
    fn fill_missing_from(&self, style: &DiagramStyle) -> Self;
}

/// A text label used as diagram content.
///
/// Carries an optional box flag: note contents are boxed (drawn with a
/// background and border), plain line labels are not. Padding is part of
/// the measured size, so the layout engine can treat every label as a
/// single opaque rectangle.
///
/// Padding and font are optional overrides; anything left unset is
/// filled from the diagram style when the engine resolves the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: String,
    definition: Option<TextDefinition>,
    padding: Option<Insets>,
    boxed: bool,
}

impl Label {
    /// Creates a plain label, as used on lines and participants. Padding
    /// stays zero unless overridden.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            definition: None,
            padding: None,
            boxed: false,
        }
    }

    /// Creates a boxed note label. Padding comes from the diagram style's
    /// note padding unless overridden with [`Label::with_padding`].
    pub fn note(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            definition: None,
            padding: None,
            boxed: true,
        }
    }

    /// Returns a copy with the given font configuration, overriding the
    /// diagram style's.
    pub fn with_definition(mut self, definition: TextDefinition) -> Self {
        self.definition = Some(definition);
        self
    }

    /// Returns a copy with the given padding, overriding the diagram
    /// style's note padding.
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Returns the label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the label's own font configuration, if set.
    pub fn definition(&self) -> Option<&TextDefinition> {
        self.definition.as_ref()
    }

    /// Returns the padding around the text; zero while unset.
    pub fn padding(&self) -> Insets {
        self.padding.unwrap_or_default()
    }

    /// Returns true if the label is drawn as a box with background and border.
    pub fn is_boxed(&self) -> bool {
        self.boxed
    }
}

impl StyleDefaults for Label {
    fn fill_missing_from(&self, style: &DiagramStyle) -> Self {
        Self {
            text: self.text.clone(),
            definition: self
                .definition
                .clone()
                .or_else(|| Some(style.text().clone())),
            padding: self
                .padding
                .or_else(|| self.boxed.then(|| style.note_padding())),
            boxed: self.boxed,
        }
    }
}

impl Measurer<Label> for TextMeasurer {
    fn measure(&mut self, label: &Label, constraints: Constraints) -> Size {
        let inner = constraints.deflate_width(label.padding());
        let wrap_width = inner.max_width().is_finite().then_some(inner.max_width());
        let definition = label.definition().cloned().unwrap_or_default();
        let text_size = TextMeasurer::measure(self, label.text(), &definition, wrap_width);
        constraints.constrain(text_size.add_padding(label.padding()))
    }

    fn min_intrinsic_width(&mut self, label: &Label) -> f32 {
        let definition = label.definition().cloned().unwrap_or_default();
        TextMeasurer::min_intrinsic_width(self, label.text(), &definition)
            + label.padding().horizontal_sum()
    }

    fn max_intrinsic_width(&mut self, label: &Label) -> f32 {
        let definition = label.definition().cloned().unwrap_or_default();
        TextMeasurer::max_intrinsic_width(self, label.text(), &definition)
            + label.padding().horizontal_sum()
    }
}

/// Deterministic label measurer using a fixed character grid.
///
/// Every character is `char_width` wide and every line is `line_height`
/// tall. Wrapping is greedy at whitespace; explicit `\n` characters always
/// break. No fonts are consulted, so results are identical on every
/// machine.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    char_width: f32,
    line_height: f32,
}

impl MonospaceMeasurer {
    /// Creates a measurer with the given cell dimensions.
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }

    /// Returns the width of one character cell.
    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    /// Returns the height of one line.
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Wraps `text` into lines no wider than `max_width` and returns
    /// `(widest line width, line count)`.
    fn wrap(&self, text: &str, max_width: f32) -> (f32, usize) {
        let mut widest: f32 = 0.0;
        let mut line_count = 0;

        for paragraph in text.split('\n') {
            let mut current_chars: usize = 0;

            for word in paragraph.split_whitespace() {
                let word_chars = word.chars().count();
                let joined = if current_chars == 0 {
                    word_chars
                } else {
                    current_chars + 1 + word_chars
                };

                if current_chars == 0 || joined as f32 * self.char_width <= max_width {
                    current_chars = joined;
                } else {
                    widest = widest.max(current_chars as f32 * self.char_width);
                    line_count += 1;
                    current_chars = word_chars;
                }
            }

            widest = widest.max(current_chars as f32 * self.char_width);
            line_count += 1;
        }

        (widest, line_count)
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

impl Measurer<Label> for MonospaceMeasurer {
    fn measure(&mut self, label: &Label, constraints: Constraints) -> Size {
        if label.text().is_empty() {
            return constraints.constrain(Size::default().add_padding(label.padding()));
        }

        let inner = constraints.deflate_width(label.padding());
        let (width, lines) = self.wrap(label.text(), inner.max_width());
        let text_size = Size::new(width, lines as f32 * self.line_height);

        constraints.constrain(text_size.add_padding(label.padding()))
    }

    fn min_intrinsic_width(&mut self, label: &Label) -> f32 {
        let longest_word = label
            .text()
            .split_whitespace()
            .map(|word| word.chars().count())
            .max()
            .unwrap_or(0);
        longest_word as f32 * self.char_width + label.padding().horizontal_sum()
    }

    fn max_intrinsic_width(&mut self, label: &Label) -> f32 {
        let (width, _) = self.wrap(label.text(), f32::INFINITY);
        width + label.padding().horizontal_sum()
    }
}
