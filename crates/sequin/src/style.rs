//! Visual styling for sequence diagrams.
//!
//! # Overview
//!
//! - [`DiagramStyle`]: Diagram-wide spacing, colors, fonts, and layout
//!   direction. One instance is owned by each
//!   [`Diagram`](crate::scene::Diagram).
//! - [`LineStyle`]: Per-line overrides where every field is optional;
//!   unset fields fall back first to the diagram's line style and then to
//!   hard defaults via [`LineStyle::fill_missing_from`] and
//!   [`LineStyle::to_stroke`].
//! - [`ArrowHead`]: Filled or outlined arrow-head glyphs.
//! - [`LayoutDirection`]: Left-to-right or right-to-left participant
//!   ordering.

use std::str::FromStr;

use sequin_core::{
    color::Color,
    draw::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle, TextDefinition},
    geometry::Insets,
};

/// Stroke width used when neither a line nor the diagram style sets one.
const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// Arrow-head rendering variants.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ArrowHead {
    /// Solid triangle filled with the line color (default)
    #[default]
    Filled,
    /// Triangle outline stroked with the line color
    Outlined,
}

/// Horizontal reading direction of the diagram.
///
/// Layout is always solved left-to-right; for right-to-left diagrams the
/// finished geometry is mirrored as a final step, so the first participant
/// ends up at the right edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDirection {
    /// First participant at the left edge (default)
    #[default]
    LeftToRight,
    /// First participant at the right edge
    RightToLeft,
}

impl FromStr for LayoutDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ltr" | "left-to-right" => Ok(Self::LeftToRight),
            "rtl" | "right-to-left" => Ok(Self::RightToLeft),
            _ => Err(format!(
                "invalid direction `{s}`, valid values: ltr, rtl, left-to-right, right-to-left"
            )),
        }
    }
}

/// Partial line styling where every property is optional.
///
/// Lines accumulate style in two steps: overrides set on an individual
/// line win over the diagram-wide [`DiagramStyle::line_style`], and any
/// property still unset falls back to a hard default when the stroke is
/// resolved for rendering.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineStyle {
    color: Option<Color>,
    width: Option<f32>,
    stroke_style: Option<StrokeStyle>,
    cap: Option<StrokeCap>,
    join: Option<StrokeJoin>,
    arrow_head: Option<ArrowHead>,
}

impl LineStyle {
    /// Creates a line style with no properties set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the line color set.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Returns a copy with the stroke width set.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Returns a copy with the dash pattern set.
    pub fn with_stroke_style(mut self, style: StrokeStyle) -> Self {
        self.stroke_style = Some(style);
        self
    }

    /// Returns a copy with the line-cap style set.
    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Returns a copy with the line-join style set.
    pub fn with_join(mut self, join: StrokeJoin) -> Self {
        self.join = Some(join);
        self
    }

    /// Returns a copy with the arrow-head variant set.
    pub fn with_arrow_head(mut self, head: ArrowHead) -> Self {
        self.arrow_head = Some(head);
        self
    }

    /// Returns the line color, if set.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns the stroke width, if set.
    pub fn width(&self) -> Option<f32> {
        self.width
    }

    /// Returns the dash pattern, if set.
    pub fn stroke_style(&self) -> Option<&StrokeStyle> {
        self.stroke_style.as_ref()
    }

    /// Returns the line-cap style, if set.
    pub fn cap(&self) -> Option<StrokeCap> {
        self.cap
    }

    /// Returns the line-join style, if set.
    pub fn join(&self) -> Option<StrokeJoin> {
        self.join
    }

    /// Returns the arrow-head variant, if set.
    pub fn arrow_head(&self) -> Option<ArrowHead> {
        self.arrow_head
    }

    /// Merges two partial styles: properties set on `self` win, properties
    /// missing on `self` are taken from `fallback`.
    pub fn fill_missing_from(&self, fallback: &LineStyle) -> LineStyle {
        LineStyle {
            color: self.color.or(fallback.color),
            width: self.width.or(fallback.width),
            stroke_style: self
                .stroke_style
                .clone()
                .or_else(|| fallback.stroke_style.clone()),
            cap: self.cap.or(fallback.cap),
            join: self.join.or(fallback.join),
            arrow_head: self.arrow_head.or(fallback.arrow_head),
        }
    }

    /// Resolves this style into a concrete stroke, substituting hard
    /// defaults (black, 2px, solid) for unset properties.
    pub fn to_stroke(&self) -> StrokeDefinition {
        let mut stroke = StrokeDefinition::new(
            self.color.unwrap_or_default(),
            self.width.unwrap_or(DEFAULT_LINE_WIDTH),
        );
        if let Some(style) = &self.stroke_style {
            stroke.set_style(style.clone());
        }
        if let Some(cap) = self.cap {
            stroke.set_cap(cap);
        }
        if let Some(join) = self.join {
            stroke.set_join(join);
        }
        stroke
    }

    /// Resolves the arrow-head variant, defaulting to [`ArrowHead::Filled`].
    pub fn resolved_arrow_head(&self) -> ArrowHead {
        self.arrow_head.unwrap_or_default()
    }
}

/// Diagram-wide styling and layout parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramStyle {
    participant_spacing: f32,
    vertical_spacing: f32,
    label_padding: f32,
    note_padding: Insets,
    note_background: Color,
    background: Option<Color>,
    line_style: LineStyle,
    text: TextDefinition,
    balance_labels: bool,
    direction: LayoutDirection,
}

impl DiagramStyle {
    /// Creates a style with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum horizontal gap between adjacent participant labels.
    pub fn participant_spacing(&self) -> f32 {
        self.participant_spacing
    }

    /// Vertical gap between consecutive rows and around the label bands.
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    /// Horizontal breathing room used around row labels and between
    /// off-lifeline items and the lifelines they are not anchored to.
    pub fn label_padding(&self) -> f32 {
        self.label_padding
    }

    /// Padding inside note boxes.
    pub fn note_padding(&self) -> Insets {
        self.note_padding
    }

    /// Fill color for note boxes and label-backing rectangles.
    pub fn note_background(&self) -> Color {
        self.note_background
    }

    /// Canvas background color, or `None` for a transparent canvas.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Diagram-wide default line style.
    pub fn line_style(&self) -> &LineStyle {
        &self.line_style
    }

    /// Font configuration for all labels.
    pub fn text(&self) -> &TextDefinition {
        &self.text
    }

    /// Whether wrappable labels are squeezed toward a square aspect ratio.
    pub fn balance_labels(&self) -> bool {
        self.balance_labels
    }

    /// Horizontal reading direction.
    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    /// Sets the minimum gap between adjacent participant labels.
    pub fn set_participant_spacing(&mut self, spacing: f32) {
        self.participant_spacing = spacing;
    }

    /// Sets the vertical gap between rows.
    pub fn set_vertical_spacing(&mut self, spacing: f32) {
        self.vertical_spacing = spacing;
    }

    /// Sets the padding around row labels.
    pub fn set_label_padding(&mut self, padding: f32) {
        self.label_padding = padding;
    }

    /// Sets the padding inside note boxes.
    pub fn set_note_padding(&mut self, padding: Insets) {
        self.note_padding = padding;
    }

    /// Sets the note fill color.
    pub fn set_note_background(&mut self, color: Color) {
        self.note_background = color;
    }

    /// Sets the canvas background color.
    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    /// Sets the diagram-wide default line style.
    pub fn set_line_style(&mut self, style: LineStyle) {
        self.line_style = style;
    }

    /// Sets the font configuration for all labels.
    pub fn set_text(&mut self, text: TextDefinition) {
        self.text = text;
    }

    /// Enables or disables label balancing.
    pub fn set_balance_labels(&mut self, balance: bool) {
        self.balance_labels = balance;
    }

    /// Sets the horizontal reading direction.
    pub fn set_direction(&mut self, direction: LayoutDirection) {
        self.direction = direction;
    }
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            participant_spacing: 16.0,
            vertical_spacing: 16.0,
            label_padding: 8.0,
            note_padding: Insets::uniform(8.0),
            note_background: Color::new("white").unwrap(),
            background: None,
            line_style: LineStyle::new(),
            text: TextDefinition::default(),
            balance_labels: true,
            direction: LayoutDirection::LeftToRight,
        }
    }
}
