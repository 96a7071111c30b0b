//! Placement of rows that cross multiple columns.
//!
//! Once the column grid is solved every lifeline has a fixed
//! x-coordinate, so a row between non-adjacent participants is just a
//! span between two known points. Lines stretch to exactly that span;
//! spanning notes are forced wide enough to overhang both endpoint
//! lifelines and may grow further into the outer label halves.

use sequin_core::geometry::{Constraints, Point};

use crate::{
    layout::{
        ARROW_HEAD_HEIGHT, LabelBox, RowBox, RowVisual,
        columns::ColumnGrid,
        intrinsics::{ParticipantMetrics, RowIntrinsics},
    },
    measure::Measurer,
    scene::{Participant, RowItem},
    style::DiagramStyle,
};

/// Measures and horizontally places a multi-column row against the
/// solved lifeline positions.
///
/// Single-column rows never reach this function; they are placed by the
/// column pass.
pub(crate) fn place_spanning<C, M: Measurer<C>>(
    row: &RowItem<C>,
    metrics: &RowIntrinsics,
    grid: &ColumnGrid,
    participants: &[ParticipantMetrics],
    style: &DiagramStyle,
    measurer: &mut M,
) -> RowBox {
    let label_padding = style.label_padding();

    match row {
        RowItem::Line { from, to, label, .. } => {
            let (lo, hi) = ordered(*from, *to);
            let start = grid.centers[lo];
            let end = grid.centers[hi];
            let width = end - start;

            let label_box = label.as_ref().map(|content| {
                let constraints =
                    Constraints::loose_width((width - 2.0 * label_padding).max(0.0))
                        .cap_max_width(metrics.content_max);
                let size = measurer.measure(content, constraints);
                LabelBox {
                    offset: Point::new((width - size.width()) / 2.0, 0.0),
                    size,
                }
            });
            let height = label_box.as_ref().map_or(ARROW_HEAD_HEIGHT, |label| {
                label.size.height() + label_padding + ARROW_HEAD_HEIGHT
            });
            RowBox {
                left: start,
                width,
                height,
                label: label_box,
                visual: RowVisual::Arrow {
                    forward: from.is_before(*to),
                },
            }
        }
        RowItem::SpanningNote {
            participants: covered,
            content,
        } => {
            let lo = covered
                .iter()
                .map(Participant::index)
                .min()
                .unwrap_or(0);
            let hi = covered
                .iter()
                .map(Participant::index)
                .max()
                .unwrap_or(0);
            let start = grid.centers[lo];
            let end = grid.centers[hi];
            let span = end - start;

            // The note must overhang the endpoint lifelines by one
            // padding each, and may grow up to half of each endpoint's
            // label before it starts pushing into foreign columns.
            let min_width = span + 2.0 * label_padding;
            let max_width = min_width.max(
                span + participants[lo].label_width() / 2.0
                    + participants[hi].label_width() / 2.0,
            );
            let constraints = Constraints::width_range(min_width, max_width)
                .cap_max_width(metrics.content_max);
            let size = measurer.measure(content, constraints);

            RowBox {
                left: start - label_padding,
                width: size.width(),
                height: size.height(),
                label: None,
                visual: RowVisual::SpanningNote,
            }
        }
        RowItem::LineToSelf { .. } | RowItem::Note { .. } => {
            // Unreachable through the engine; keep degenerate output
            // instead of panicking in release code.
            RowBox {
                left: 0.0,
                width: 0.0,
                height: 0.0,
                label: None,
                visual: RowVisual::Note,
            }
        }
    }
}

fn ordered(from: Participant, to: Participant) -> (usize, usize) {
    let a = from.index();
    let b = to.index();
    (a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use crate::layout::columns::solve;
    use crate::layout::intrinsics::measure_scene;
    use crate::measure::{Label, MonospaceMeasurer};
    use crate::scene::Diagram;
    use crate::style::DiagramStyle;

    use super::*;

    fn three_lifelines() -> (Diagram<Label>, [Participant; 3], DiagramStyle) {
        let style = DiagramStyle::default();
        let mut diagram = Diagram::new(style.clone());
        let a = diagram.add_participant(Some(Label::new("aaaa")), None);
        let b = diagram.add_participant(Some(Label::new("bbbb")), None);
        let c = diagram.add_participant(Some(Label::new("cccc")), None);
        (diagram, [a, b, c], style)
    }

    #[test]
    fn test_long_line_spans_endpoint_lifelines() {
        let (mut diagram, [a, _, c], style) = three_lifelines();
        diagram.line(a, c).label(Label::new("hop"));

        let mut measurer = MonospaceMeasurer::new(1.0, 1.0);
        let (metrics, rows) = measure_scene(&diagram, &mut measurer, &style).unwrap();
        let grid = solve(&diagram, &metrics, &rows, &style);

        let placed = place_spanning(
            &diagram.rows()[0],
            &rows[0],
            &grid,
            &metrics,
            &style,
            &mut measurer,
        );

        assert_approx_eq!(f32, placed.left, grid.centers[0]);
        assert_approx_eq!(f32, placed.left + placed.width, grid.centers[2]);
        assert!(matches!(
            placed.visual,
            RowVisual::Arrow { forward: true }
        ));
    }

    #[test]
    fn test_reversed_line_keeps_span_but_flips_direction() {
        let (mut diagram, [a, _, c], style) = three_lifelines();
        diagram.line(c, a);

        let mut measurer = MonospaceMeasurer::new(1.0, 1.0);
        let (metrics, rows) = measure_scene(&diagram, &mut measurer, &style).unwrap();
        let grid = solve(&diagram, &metrics, &rows, &style);

        let placed = place_spanning(
            &diagram.rows()[0],
            &rows[0],
            &grid,
            &metrics,
            &style,
            &mut measurer,
        );

        assert_approx_eq!(f32, placed.left, grid.centers[0]);
        assert_approx_eq!(f32, placed.left + placed.width, grid.centers[2]);
        assert!(matches!(
            placed.visual,
            RowVisual::Arrow { forward: false }
        ));
    }

    #[test]
    fn test_spanning_note_overhangs_both_lifelines() {
        let (mut diagram, [a, b, _], style) = three_lifelines();
        diagram.note_over(&[a, b], Label::new("hi")).unwrap();

        let mut measurer = MonospaceMeasurer::new(1.0, 1.0);
        let (metrics, rows) = measure_scene(&diagram, &mut measurer, &style).unwrap();
        let grid = solve(&diagram, &metrics, &rows, &style);

        let placed = place_spanning(
            &diagram.rows()[0],
            &rows[0],
            &grid,
            &metrics,
            &style,
            &mut measurer,
        );

        let pad = style.label_padding();
        assert_approx_eq!(f32, placed.left, grid.centers[0] - pad);
        // Short content still gets stretched across both lifelines.
        assert!(placed.left + placed.width >= grid.centers[1] + pad);
        assert!(matches!(placed.visual, RowVisual::SpanningNote));
    }
}
