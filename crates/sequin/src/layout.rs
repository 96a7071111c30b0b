//! Layout solving for sequence diagrams.
//!
//! # Overview
//!
//! [`LayoutEngine::compute`] turns a [`Diagram`](crate::scene::Diagram)
//! plus a [`Measurer`](crate::measure::Measurer) into a [`Layout`]: pure
//! geometry with no text or styling left in it. Solving runs in passes:
//!
//! 1. [`intrinsics`]: measure participant labels and collect per-row
//!    intrinsic widths.
//! 2. [`columns`]: solve the column grid. A diagram with `n` participants
//!    has `2n + 1` columns; odd columns sit on lifelines, even columns are
//!    the gaps between (and outside) them. This pass fixes every
//!    lifeline's x-coordinate and the total width.
//! 3. [`spanning`]: size rows that cross multiple columns against the
//!    now-known lifeline positions.
//! 4. [`vertical`]: stack rows downward between the participant label
//!    bands.
//!
//! Right-to-left diagrams are solved left-to-right and mirrored as a
//! final step.

use sequin_core::geometry::{Bounds, Point, Size};

use crate::style::LayoutDirection;

mod balance;
mod columns;
mod engine;
mod intrinsics;
mod spanning;
mod vertical;

pub use balance::balanced_max_width;
pub use engine::LayoutEngine;

/// Width of the arrow-head glyph in pixels.
pub const ARROW_HEAD_WIDTH: f32 = 8.0;

/// Height of the arrow-head glyph in pixels.
pub const ARROW_HEAD_HEIGHT: f32 = 10.0;

/// Minimum height of a self-call loop in pixels.
pub const MIN_SELF_LOOP_HEIGHT: f32 = 20.0;

/// What a placed row should be drawn as.
///
/// Visuals carry reading-order semantics, not screen-direction ones:
/// `forward` means "toward the later participant". The renderer combines
/// this with [`Layout::direction`] to pick a screen side for the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowVisual {
    /// A message arrow. `forward` is true when the message goes from an
    /// earlier participant to a later one.
    Arrow { forward: bool },
    /// A self-call loop attached to one lifeline.
    SelfArrow,
    /// A note anchored to a single participant.
    Note,
    /// A note spanning multiple participants.
    SpanningNote,
}

/// A placed row: where it is and what to draw there.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    bounds: Bounds,
    label: Option<Bounds>,
    visual: RowVisual,
}

impl RowLayout {
    /// Returns the rectangle the row occupies.
    ///
    /// For notes this is the note box itself; for lines it covers the
    /// label (if any) and the arrow band beneath it.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the label rectangle for line rows that carry a label.
    ///
    /// Note rows return `None`: their content fills [`bounds`](Self::bounds).
    pub fn label(&self) -> Option<Bounds> {
        self.label
    }

    /// Returns what this row is drawn as.
    pub fn visual(&self) -> RowVisual {
        self.visual
    }
}

/// A placed participant: lifeline position and label rectangles.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantLayout {
    center_x: f32,
    label_width: f32,
    top_label: Option<Bounds>,
    bottom_label: Option<Bounds>,
    lifeline_top: f32,
    lifeline_bottom: f32,
}

impl ParticipantLayout {
    /// Returns the x-coordinate of the lifeline.
    pub fn center_x(&self) -> f32 {
        self.center_x
    }

    /// Returns the width of the participant's widest label.
    pub fn label_width(&self) -> f32 {
        self.label_width
    }

    /// Returns the left edge of the participant's label slot.
    pub fn left(&self) -> f32 {
        self.center_x - self.label_width / 2.0
    }

    /// Returns the rectangle of the label above the lifeline, if any.
    pub fn top_label(&self) -> Option<Bounds> {
        self.top_label
    }

    /// Returns the rectangle of the label below the lifeline, if any.
    pub fn bottom_label(&self) -> Option<Bounds> {
        self.bottom_label
    }

    /// Returns the y-coordinate where the lifeline starts.
    pub fn lifeline_top(&self) -> f32 {
        self.lifeline_top
    }

    /// Returns the y-coordinate where the lifeline ends.
    pub fn lifeline_bottom(&self) -> f32 {
        self.lifeline_bottom
    }
}

/// The finished geometry of a diagram.
///
/// Participants and rows appear in the same order as in the scene that
/// produced them, so a renderer can walk scene and layout side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    size: Size,
    direction: LayoutDirection,
    participants: Vec<ParticipantLayout>,
    rows: Vec<RowLayout>,
}

impl Layout {
    fn empty(direction: LayoutDirection) -> Self {
        Self {
            size: Size::default(),
            direction,
            participants: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Returns the total canvas size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the reading direction the layout was produced for.
    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    /// Returns the placed participants in creation order.
    pub fn participants(&self) -> &[ParticipantLayout] {
        &self.participants
    }

    /// Returns the placed rows in top-to-bottom order.
    pub fn rows(&self) -> &[RowLayout] {
        &self.rows
    }
}

/// A label rectangle local to its row: offset from the row's top-left
/// corner plus a size.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LabelBox {
    pub(crate) offset: Point,
    pub(crate) size: Size,
}

/// A horizontally placed and sized row, before vertical stacking.
#[derive(Debug, Clone)]
pub(crate) struct RowBox {
    pub(crate) left: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) label: Option<LabelBox>,
    pub(crate) visual: RowVisual,
}
