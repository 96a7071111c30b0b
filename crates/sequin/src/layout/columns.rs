//! Column grid solving and single-column row placement.
//!
//! A diagram with `n` participants spans `2n + 1` columns: column `2i + 1`
//! sits on participant `i`'s lifeline, the even columns are the gaps
//! before, between, and after the lifelines. Every single-column row is
//! assigned to one of them:
//!
//! - a note to the start of participant `i` goes in gap `2i`,
//! - a note over participant `i` goes on lifeline `2i + 1`,
//! - a note to the end, a self loop, or a line to the adjacent
//!   participant goes in gap `2i + 2`.
//!
//! A column resolves to the widest of: its own occupants, half of each
//! neighboring column (items on a lifeline straddle the gaps beside it),
//! and the room the participant labels themselves demand. Lifeline
//! x-positions then fall out of a single prefix-sum walk, since only gap
//! columns consume horizontal space.

use sequin_core::geometry::{Constraints, Point, Size};

use crate::{
    layout::{
        ARROW_HEAD_HEIGHT, ARROW_HEAD_WIDTH, LabelBox, MIN_SELF_LOOP_HEIGHT, RowBox, RowVisual,
        intrinsics::{ParticipantMetrics, RowIntrinsics},
    },
    measure::Measurer,
    scene::{Alignment, Diagram, RowItem},
    style::DiagramStyle,
};

/// The solved column grid.
#[derive(Debug, Clone)]
pub(crate) struct ColumnGrid {
    /// Resolved width per column, `2n + 1` entries.
    pub(crate) widths: Vec<f32>,
    /// Lifeline x-coordinate per participant, `n` entries.
    pub(crate) centers: Vec<f32>,
    /// Total diagram width.
    pub(crate) total_width: f32,
}

impl ColumnGrid {
    /// Returns the left edge of a column: the center of the participant
    /// before it, or zero for the leftmost columns.
    fn column_left(&self, column: usize) -> f32 {
        if column >= 2 {
            self.centers[column / 2 - 1]
        } else {
            0.0
        }
    }
}

/// Returns the column a row occupies, or `None` for rows that span
/// several columns.
pub(crate) fn column_of<C>(row: &RowItem<C>) -> Option<usize> {
    match row {
        RowItem::Line { from, to, .. } if from.is_adjacent_to(*to) => {
            Some(from.index().min(to.index()) * 2 + 2)
        }
        RowItem::Line { .. } | RowItem::SpanningNote { .. } => None,
        RowItem::LineToSelf { participant, .. } => Some(participant.index() * 2 + 2),
        RowItem::Note {
            participant,
            alignment,
            ..
        } => Some(match alignment {
            Alignment::Start => participant.index() * 2,
            Alignment::Over => participant.index() * 2 + 1,
            Alignment::End => participant.index() * 2 + 2,
        }),
    }
}

/// Solves the column grid from participant metrics and row intrinsics.
pub(crate) fn solve<C>(
    diagram: &Diagram<C>,
    participants: &[ParticipantMetrics],
    rows: &[RowIntrinsics],
    style: &DiagramStyle,
) -> ColumnGrid {
    let participant_count = participants.len();
    let column_count = 2 * participant_count + 1;
    let spacing = style.participant_spacing();
    let label_padding = style.label_padding();

    // Intrinsic pass: widest occupant per column, plus breathing room for
    // off-lifeline items in interior columns. Lines between adjacent
    // participants get none, they are expected to touch both lifelines.
    let mut intrinsic = vec![0.0f32; column_count];
    for (row, metrics) in diagram.rows().iter().zip(rows) {
        let Some(column) = column_of(row) else {
            continue;
        };
        let breathing_room = match row {
            RowItem::Line { .. } => 0.0,
            _ if column == 0 || column == column_count - 1 => 0.0,
            _ => 2.0 * label_padding,
        };
        intrinsic[column] = intrinsic[column].max(metrics.width + breathing_room);
    }

    // Resolution pass: each column also makes room for halves of its
    // neighbors' occupants and for the participant labels around it.
    let mut widths = vec![0.0f32; column_count];
    let mut centers = vec![0.0f32; participant_count];
    let mut offset = 0.0f32;

    for column in 0..column_count {
        let bleed_before = if column == 0 {
            0.0
        } else {
            intrinsic[column - 1] / 2.0
        };
        let bleed_after = if column + 1 == column_count {
            0.0
        } else {
            intrinsic[column + 1] / 2.0
        };

        let label_extent = if column % 2 == 1 {
            // Lifeline column: the participant's own label, plus the
            // halves of its neighbors' labels that lean into this slot.
            let index = column / 2;
            let own = participants[index].label_width();
            let before = index
                .checked_sub(1)
                .map_or(0.0, |i| participants[i].label_width() / 2.0 + spacing);
            let after = participants
                .get(index + 1)
                .map_or(0.0, |p| p.label_width() / 2.0 + spacing);
            before + own + after
        } else {
            // Gap column: half a label on each side, spaced apart when
            // the gap is interior.
            let before = column
                .checked_sub(1)
                .map(|c| participants[c / 2].label_width() / 2.0);
            let after = if column / 2 < participant_count {
                Some(participants[column / 2].label_width() / 2.0)
            } else {
                None
            };
            let between = if before.is_some() && after.is_some() {
                spacing
            } else {
                0.0
            };
            before.unwrap_or(0.0) + between + after.unwrap_or(0.0)
        };

        widths[column] = intrinsic[column]
            .max(bleed_before)
            .max(bleed_after)
            .max(label_extent);

        // Only gap columns consume horizontal space; a lifeline sits at
        // the running edge when its column comes up.
        if column % 2 == 1 {
            offset += widths[column - 1];
            centers[column / 2] = offset;
        }
    }

    let total_width = offset + widths.last().copied().unwrap_or(0.0);

    ColumnGrid {
        widths,
        centers,
        total_width,
    }
}

/// Measures and horizontally places a single-column row inside its
/// resolved column.
pub(crate) fn place_in_column<C, M: Measurer<C>>(
    row: &RowItem<C>,
    metrics: &RowIntrinsics,
    column: usize,
    grid: &ColumnGrid,
    style: &DiagramStyle,
    measurer: &mut M,
) -> RowBox {
    let column_width = grid.widths[column];
    let column_left = grid.column_left(column);
    let label_padding = style.label_padding();

    match row {
        RowItem::Line { from, to, label, .. } => {
            // The line is pinned to both lifelines: exactly column wide.
            let label_box = label.as_ref().map(|content| {
                let constraints = Constraints::loose_width(
                    (column_width - 2.0 * label_padding).max(0.0),
                )
                .cap_max_width(metrics.content_max);
                let size = measurer.measure(content, constraints);
                LabelBox {
                    offset: Point::new((column_width - size.width()) / 2.0, 0.0),
                    size,
                }
            });
            let height = label_box.as_ref().map_or(ARROW_HEAD_HEIGHT, |label| {
                label.size.height() + label_padding + ARROW_HEAD_HEIGHT
            });
            RowBox {
                left: column_left,
                width: column_width,
                height,
                label: label_box,
                visual: RowVisual::Arrow {
                    forward: from.is_before(*to),
                },
            }
        }
        RowItem::LineToSelf { label, .. } => {
            let loop_width = 2.0 * ARROW_HEAD_WIDTH;
            let label_size = label.as_ref().map(|content| {
                let constraints = Constraints::loose_width(
                    (column_width - loop_width - label_padding).max(0.0),
                )
                .cap_max_width(metrics.content_max);
                measurer.measure(content, constraints)
            });
            let width = label_size.map_or(loop_width, |size| {
                loop_width + label_padding + size.width()
            });
            let height = label_size
                .map_or(0.0, Size::height)
                .max(MIN_SELF_LOOP_HEIGHT);
            let label_box = label_size.map(|size| LabelBox {
                offset: Point::new(
                    loop_width + label_padding,
                    (height - size.height()) / 2.0,
                ),
                size,
            });
            RowBox {
                left: column_left,
                width,
                height,
                label: label_box,
                visual: RowVisual::SelfArrow,
            }
        }
        RowItem::Note {
            alignment, content, ..
        } => {
            let anchored_side = match alignment {
                Alignment::Start | Alignment::End => label_padding,
                Alignment::Over => 0.0,
            };
            let constraints =
                Constraints::loose_width((column_width - anchored_side).max(0.0))
                    .cap_max_width(metrics.content_max);
            let size = measurer.measure(content, constraints);
            let left = match alignment {
                // Right edge one padding short of the lifeline.
                Alignment::Start => column_left + column_width - anchored_side - size.width(),
                // Left edge one padding past the lifeline.
                Alignment::End => column_left + anchored_side,
                Alignment::Over => grid.centers[column / 2] - size.width() / 2.0,
            };
            RowBox {
                left,
                width: size.width(),
                height: size.height(),
                label: None,
                visual: RowVisual::Note,
            }
        }
        // Spanning rows are placed by the spanning pass.
        RowItem::SpanningNote { .. } => RowBox {
            left: 0.0,
            width: 0.0,
            height: 0.0,
            label: None,
            visual: RowVisual::SpanningNote,
        },
    }
}
