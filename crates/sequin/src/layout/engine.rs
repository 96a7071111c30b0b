//! The layout engine driver.
//!
//! Runs the measurement, column, spanning, and vertical passes in order
//! and assembles the result into a [`Layout`]. Right-to-left diagrams
//! are solved in reading order and mirrored across the vertical axis at
//! the very end, so none of the passes need to know about direction.

use log::debug;
use sequin_core::geometry::{Bounds, Point, Size};

use crate::{
    error::DiagramError,
    layout::{
        Layout, ParticipantLayout, RowBox, RowLayout,
        columns::{self, ColumnGrid},
        intrinsics::{self, ParticipantMetrics},
        spanning, vertical,
    },
    measure::{Measurer, StyleDefaults},
    scene::Diagram,
    style::LayoutDirection,
};

/// Computes [`Layout`]s from diagrams.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    pub fn new() -> Self {
        Self
    }

    /// Solves the full layout for a diagram.
    ///
    /// The diagram is read-only; laying the same scene out repeatedly
    /// (with different measurers, say) is fine. An empty diagram yields
    /// an empty zero-size layout rather than an error. Content styling
    /// left unset is filled from the diagram style before measuring.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::InternalInvariant`] if a solver pass
    /// produces inconsistent results, e.g. lifelines out of order.
    pub fn compute<C: StyleDefaults, M: Measurer<C>>(
        &self,
        diagram: &Diagram<C>,
        measurer: &mut M,
    ) -> Result<Layout, DiagramError> {
        let style = diagram.style();
        let direction = style.direction();

        if diagram.participants().is_empty() {
            debug!("empty diagram, producing empty layout");
            return Ok(Layout::empty(direction));
        }

        // Resolve once so every pass measures concrete padding and fonts.
        let diagram = diagram.map_content(|content| content.fill_missing_from(style));

        let (participants, row_intrinsics) = intrinsics::measure_scene(&diagram, measurer, style)?;
        let grid = columns::solve(&diagram, &participants, &row_intrinsics, style);
        debug!(
            participants = participants.len(),
            rows = diagram.rows().len(),
            width = grid.total_width;
            "column grid solved"
        );

        if let Some(pair) = grid.centers.windows(2).find(|pair| pair[0] > pair[1]) {
            return Err(DiagramError::InternalInvariant(format!(
                "lifelines out of order: {} placed after {}",
                pair[1], pair[0]
            )));
        }

        let boxes: Vec<RowBox> = diagram
            .rows()
            .iter()
            .zip(&row_intrinsics)
            .map(|(row, metrics)| match columns::column_of(row) {
                Some(column) => {
                    columns::place_in_column(row, metrics, column, &grid, style, measurer)
                }
                None => {
                    spanning::place_spanning(row, metrics, &grid, &participants, style, measurer)
                }
            })
            .collect();

        let frame = vertical::stack(&participants, &boxes, style);
        debug!(height = frame.total_height; "rows stacked");

        let size = Size::new(grid.total_width, frame.total_height);
        let mut layout = Layout {
            size,
            direction,
            participants: assemble_participants(&participants, &grid, &frame),
            rows: assemble_rows(&boxes, &frame),
        };

        if direction == LayoutDirection::RightToLeft {
            mirror(&mut layout);
        }

        Ok(layout)
    }
}

fn assemble_participants(
    participants: &[ParticipantMetrics],
    grid: &ColumnGrid,
    frame: &vertical::VerticalFrame,
) -> Vec<ParticipantLayout> {
    participants
        .iter()
        .enumerate()
        .map(|(index, metrics)| {
            let center_x = grid.centers[index];
            // Top labels sit bottom-aligned against the band boundary so
            // lifelines of differently labeled participants still start
            // on the same horizontal.
            let top_label = metrics.top.map(|size| {
                Bounds::from_top_left(
                    Point::new(center_x - size.width() / 2.0, frame.top_band - size.height()),
                    size,
                )
            });
            let bottom_label = metrics.bottom.map(|size| {
                Bounds::from_top_left(
                    Point::new(center_x - size.width() / 2.0, frame.bottom_band_top),
                    size,
                )
            });
            ParticipantLayout {
                center_x,
                label_width: metrics.label_width(),
                top_label,
                bottom_label,
                lifeline_top: frame.top_band,
                lifeline_bottom: frame.bottom_band_top,
            }
        })
        .collect()
}

fn assemble_rows(boxes: &[RowBox], frame: &vertical::VerticalFrame) -> Vec<RowLayout> {
    boxes
        .iter()
        .zip(&frame.row_tops)
        .map(|(row, &top)| {
            let origin = Point::new(row.left, top);
            let label = row
                .label
                .as_ref()
                .map(|label| Bounds::from_top_left(origin.add_point(label.offset), label.size));
            RowLayout {
                bounds: Bounds::from_top_left(origin, Size::new(row.width, row.height)),
                label,
                visual: row.visual,
            }
        })
        .collect()
}

/// Mirrors every x-coordinate across the vertical axis. Row visuals keep
/// their reading-order semantics; only geometry flips.
fn mirror(layout: &mut Layout) {
    let width = layout.size.width();
    for participant in &mut layout.participants {
        participant.center_x = width - participant.center_x;
        participant.top_label = participant.top_label.map(|b| b.mirror_x(width));
        participant.bottom_label = participant.bottom_label.map(|b| b.mirror_x(width));
    }
    for row in &mut layout.rows {
        row.bounds = row.bounds.mirror_x(width);
        row.label = row.label.map(|b| b.mirror_x(width));
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use crate::measure::{Label, MonospaceMeasurer};
    use crate::style::DiagramStyle;

    use super::*;

    fn measurer() -> MonospaceMeasurer {
        MonospaceMeasurer::new(1.0, 1.0)
    }

    fn sample_diagram(style: DiagramStyle) -> Diagram<Label> {
        let mut diagram = Diagram::new(style);
        let a = diagram.add_participant(Some(Label::new("alpha")), Some(Label::new("alpha")));
        let b = diagram.add_participant(Some(Label::new("beta")), None);
        diagram.line(a, b).label(Label::new("request"));
        diagram.line(b, a).label(Label::new("response"));
        diagram
    }

    #[test]
    fn test_empty_diagram_yields_empty_layout() {
        let diagram: Diagram<Label> = Diagram::default();
        let layout = LayoutEngine::new()
            .compute(&diagram, &mut measurer())
            .unwrap();

        assert!(layout.size().is_zero());
        assert!(layout.participants().is_empty());
        assert!(layout.rows().is_empty());
    }

    #[test]
    fn test_lifelines_strictly_increase_left_to_right() {
        let diagram = sample_diagram(DiagramStyle::default());
        let layout = LayoutEngine::new()
            .compute(&diagram, &mut measurer())
            .unwrap();

        let centers: Vec<f32> = layout
            .participants()
            .iter()
            .map(|p| p.center_x())
            .collect();
        assert!(centers.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_all_lifelines_share_the_same_extent() {
        let diagram = sample_diagram(DiagramStyle::default());
        let layout = LayoutEngine::new()
            .compute(&diagram, &mut measurer())
            .unwrap();

        let first = &layout.participants()[0];
        for participant in layout.participants() {
            assert_approx_eq!(f32, participant.lifeline_top(), first.lifeline_top());
            assert_approx_eq!(f32, participant.lifeline_bottom(), first.lifeline_bottom());
        }
        assert!(first.lifeline_top() < first.lifeline_bottom());
    }

    #[test]
    fn test_top_labels_bottom_align_on_the_band() {
        let diagram = sample_diagram(DiagramStyle::default());
        let layout = LayoutEngine::new()
            .compute(&diagram, &mut measurer())
            .unwrap();

        for participant in layout.participants() {
            if let Some(label) = participant.top_label() {
                assert_approx_eq!(f32, label.max_y(), participant.lifeline_top());
                assert_approx_eq!(f32, label.center_x(), participant.center_x());
            }
            if let Some(label) = participant.bottom_label() {
                assert_approx_eq!(f32, label.min_y(), participant.lifeline_bottom());
            }
        }
    }

    #[test]
    fn test_rows_stay_inside_the_canvas() {
        let diagram = sample_diagram(DiagramStyle::default());
        let layout = LayoutEngine::new()
            .compute(&diagram, &mut measurer())
            .unwrap();

        let size = layout.size();
        for row in layout.rows() {
            let bounds = row.bounds();
            assert!(bounds.min_x() >= -0.01);
            assert!(bounds.max_x() <= size.width() + 0.01);
            assert!(bounds.min_y() >= -0.01);
            assert!(bounds.max_y() <= size.height() + 0.01);
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let diagram = sample_diagram(DiagramStyle::default());
        let engine = LayoutEngine::new();
        let first = engine.compute(&diagram, &mut measurer()).unwrap();
        let second = engine.compute(&diagram, &mut measurer()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_right_to_left_mirrors_geometry() {
        let ltr = sample_diagram(DiagramStyle::default());

        let mut rtl_style = DiagramStyle::default();
        rtl_style.set_direction(crate::style::LayoutDirection::RightToLeft);
        let rtl = sample_diagram(rtl_style);

        let engine = LayoutEngine::new();
        let ltr_layout = engine.compute(&ltr, &mut measurer()).unwrap();
        let rtl_layout = engine.compute(&rtl, &mut measurer()).unwrap();

        let width = ltr_layout.size().width();
        assert_approx_eq!(f32, width, rtl_layout.size().width());
        for (l, r) in ltr_layout
            .participants()
            .iter()
            .zip(rtl_layout.participants())
        {
            assert_approx_eq!(f32, r.center_x(), width - l.center_x());
        }
        // First participant ends up on the right.
        assert!(rtl_layout.participants()[0].center_x() > rtl_layout.participants()[1].center_x());
    }

    #[test]
    fn test_visuals_keep_reading_order_in_both_directions() {
        for direction in [
            crate::style::LayoutDirection::LeftToRight,
            crate::style::LayoutDirection::RightToLeft,
        ] {
            let mut style = DiagramStyle::default();
            style.set_direction(direction);
            let diagram = sample_diagram(style);
            let layout = LayoutEngine::new()
                .compute(&diagram, &mut measurer())
                .unwrap();

            use crate::layout::RowVisual;
            assert_eq!(layout.rows()[0].visual(), RowVisual::Arrow { forward: true });
            assert_eq!(
                layout.rows()[1].visual(),
                RowVisual::Arrow { forward: false }
            );
        }
    }
}
