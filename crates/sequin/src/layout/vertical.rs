//! Vertical stacking.
//!
//! Horizontal placement leaves each row with a height; this pass stacks
//! them top to bottom between two label bands. The top band is as tall
//! as the tallest top label, the bottom band as tall as the tallest
//! bottom label, and every lifeline runs from the bottom of the top band
//! to the top of the bottom band regardless of its own labels, so all
//! lifelines start and end on the same two horizontals.

use crate::{
    layout::RowBox,
    layout::intrinsics::ParticipantMetrics,
    style::DiagramStyle,
};

/// The resolved vertical frame of a diagram.
#[derive(Debug, Clone)]
pub(crate) struct VerticalFrame {
    /// Height of the top label band; lifelines start here.
    pub(crate) top_band: f32,
    /// Top of the bottom label band; lifelines end here.
    pub(crate) bottom_band_top: f32,
    /// Total diagram height including both bands.
    pub(crate) total_height: f32,
    /// Top y-coordinate per row, in row order.
    pub(crate) row_tops: Vec<f32>,
}

/// Stacks rows downward between the participant label bands.
pub(crate) fn stack(
    participants: &[ParticipantMetrics],
    rows: &[RowBox],
    style: &DiagramStyle,
) -> VerticalFrame {
    let top_band = participants
        .iter()
        .map(ParticipantMetrics::top_height)
        .fold(0.0f32, f32::max);
    let bottom_band = participants
        .iter()
        .map(ParticipantMetrics::bottom_height)
        .fold(0.0f32, f32::max);

    let spacing = style.vertical_spacing();
    let mut y = top_band + spacing;
    let mut row_tops = Vec::with_capacity(rows.len());
    for row in rows {
        row_tops.push(y);
        y += row.height + spacing;
    }

    VerticalFrame {
        top_band,
        bottom_band_top: y,
        total_height: y + bottom_band,
        row_tops,
    }
}
