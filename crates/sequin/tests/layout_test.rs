//! End-to-end layout tests driven through the public API with the
//! deterministic monospace measurer.

use float_cmp::assert_approx_eq;
use proptest::prelude::*;

use sequin::geometry::Insets;
use sequin::layout::{ARROW_HEAD_WIDTH, RowVisual};
use sequin::{
    Diagram, DiagramError, DiagramStyle, Label, LayoutDirection, LayoutEngine, MonospaceMeasurer,
};

fn unit_measurer() -> MonospaceMeasurer {
    // 1px per character, 1px per line: label widths equal character counts.
    MonospaceMeasurer::new(1.0, 1.0)
}

#[test]
fn three_participants_pack_to_labels_plus_spacing() {
    let style = DiagramStyle::default();
    let mut diagram = Diagram::new(style.clone());
    diagram.add_participant(Some(Label::new("a".repeat(10))), None);
    diagram.add_participant(Some(Label::new("b".repeat(20))), None);
    diagram.add_participant(Some(Label::new("c".repeat(30))), None);

    let layout = LayoutEngine::new()
        .compute(&diagram, &mut unit_measurer())
        .unwrap();

    // With no rows the width is exactly the labels side by side with the
    // configured spacing between them.
    let expected = 10.0 + 20.0 + 30.0 + 2.0 * style.participant_spacing();
    assert_approx_eq!(f32, layout.size().width(), expected);

    // Lifelines sit at the centers of their label slots.
    assert_approx_eq!(f32, layout.participants()[0].center_x(), 5.0);
    assert_approx_eq!(
        f32,
        layout.participants()[1].center_x(),
        10.0 + style.participant_spacing() + 10.0
    );
}

#[test]
fn lifelines_order_follows_direction() {
    let build = |direction: LayoutDirection| {
        let mut style = DiagramStyle::default();
        style.set_direction(direction);
        let mut diagram = Diagram::new(style);
        diagram.add_participant(Some(Label::new("first")), None);
        diagram.add_participant(Some(Label::new("second")), None);
        diagram.add_participant(Some(Label::new("third")), None);
        LayoutEngine::new()
            .compute(&diagram, &mut unit_measurer())
            .unwrap()
    };

    let ltr = build(LayoutDirection::LeftToRight);
    let centers: Vec<f32> = ltr.participants().iter().map(|p| p.center_x()).collect();
    assert!(centers.windows(2).all(|pair| pair[0] < pair[1]));

    let rtl = build(LayoutDirection::RightToLeft);
    let centers: Vec<f32> = rtl.participants().iter().map(|p| p.center_x()).collect();
    assert!(centers.windows(2).all(|pair| pair[0] > pair[1]));
    assert_approx_eq!(f32, ltr.size().width(), rtl.size().width());
}

#[test]
fn self_loop_hangs_off_its_lifeline() {
    let style = DiagramStyle::default();
    let mut diagram = Diagram::new(style.clone());
    let a = diagram.add_participant(Some(Label::new("looper")), None);
    diagram.line(a, a).label(Label::new("retry"));

    let layout = LayoutEngine::new()
        .compute(&diagram, &mut unit_measurer())
        .unwrap();

    let row = &layout.rows()[0];
    assert_eq!(row.visual(), RowVisual::SelfArrow);
    assert_approx_eq!(
        f32,
        row.bounds().min_x(),
        layout.participants()[0].center_x()
    );
    assert!(row.bounds().width() >= 2.0 * ARROW_HEAD_WIDTH + style.label_padding() + 5.0);
}

#[test]
fn spanning_note_covers_both_lifelines() {
    let mut diagram = Diagram::new(DiagramStyle::default());
    let a = diagram.add_participant(Some(Label::new("producer")), None);
    let b = diagram.add_participant(Some(Label::new("broker")), None);
    let c = diagram.add_participant(Some(Label::new("consumer")), None);
    diagram.line(a, b);
    diagram.note_over(&[a, c], Label::note("whole pipeline")).unwrap();

    let layout = LayoutEngine::new()
        .compute(&diagram, &mut MonospaceMeasurer::default())
        .unwrap();

    let note = &layout.rows()[1];
    assert_eq!(note.visual(), RowVisual::SpanningNote);
    assert!(note.bounds().min_x() < layout.participants()[0].center_x());
    assert!(note.bounds().max_x() > layout.participants()[2].center_x());
}

#[test]
fn note_over_one_participant_centers_on_it() {
    let mut diagram = Diagram::new(DiagramStyle::default());
    let a = diagram.add_participant(Some(Label::new("service")), None);
    diagram.note_over(&[a], Label::note("busy")).unwrap();

    let layout = LayoutEngine::new()
        .compute(&diagram, &mut unit_measurer())
        .unwrap();

    let note = &layout.rows()[0];
    assert_eq!(note.visual(), RowVisual::Note);
    assert_approx_eq!(
        f32,
        note.bounds().center_x(),
        layout.participants()[0].center_x()
    );
}

#[test]
fn style_note_padding_widens_note_boxes() {
    let build = |padding: f32| {
        let mut style = DiagramStyle::default();
        style.set_note_padding(Insets::uniform(padding));
        let mut diagram = Diagram::new(style);
        let a = diagram.add_participant(Some(Label::new("svc")), None);
        diagram.note_to_end_of(a, Label::note("busy"));
        LayoutEngine::new()
            .compute(&diagram, &mut unit_measurer())
            .unwrap()
    };

    let default_width = build(8.0).rows()[0].bounds().width();
    let padded_width = build(50.0).rows()[0].bounds().width();

    assert!(padded_width > default_width);
    // The box grows by exactly the extra padding on each side.
    assert_approx_eq!(f32, padded_width - default_width, 2.0 * (50.0 - 8.0));
}

#[test]
fn note_over_nobody_is_rejected() {
    let mut diagram: Diagram<Label> = Diagram::default();
    diagram.add_participant(Some(Label::new("lonely")), None);

    let result = diagram.note_over(&[], Label::note("to whom?"));
    assert!(matches!(result, Err(DiagramError::InvalidArgument(_))));
}

#[test]
fn rows_between_adjacent_participants_touch_both_lifelines() {
    let mut diagram = Diagram::new(DiagramStyle::default());
    let a = diagram.add_participant(Some(Label::new("client")), None);
    let b = diagram.add_participant(Some(Label::new("server")), None);
    diagram.line(a, b).label(Label::new("call"));
    diagram.line(b, a);

    let layout = LayoutEngine::new()
        .compute(&diagram, &mut unit_measurer())
        .unwrap();

    for row in layout.rows() {
        assert_approx_eq!(
            f32,
            row.bounds().min_x(),
            layout.participants()[0].center_x()
        );
        assert_approx_eq!(
            f32,
            row.bounds().max_x(),
            layout.participants()[1].center_x()
        );
    }
    // Rows stack strictly downward.
    assert!(layout.rows()[1].bounds().min_y() > layout.rows()[0].bounds().max_y());
}

#[test]
fn wide_line_label_pushes_lifelines_apart() {
    let mut style = DiagramStyle::default();
    style.set_balance_labels(false);
    let mut diagram = Diagram::new(style.clone());
    let a = diagram.add_participant(Some(Label::new("a")), None);
    let b = diagram.add_participant(Some(Label::new("b")), None);
    let long = "x".repeat(100);
    diagram.line(a, b).label(Label::new(long));

    let layout = LayoutEngine::new()
        .compute(&diagram, &mut unit_measurer())
        .unwrap();

    let gap = layout.participants()[1].center_x() - layout.participants()[0].center_x();
    assert!(gap >= 100.0 + 2.0 * style.label_padding());
    // The label fits inside the row without clipping.
    let label = layout.rows()[0].label().unwrap();
    assert_approx_eq!(f32, label.width(), 100.0);
}

proptest! {
    #[test]
    fn arbitrary_scenes_lay_out_inside_their_canvas(
        names in prop::collection::vec("[a-z]{1,10}", 1..6),
        messages in prop::collection::vec(
            (0usize..6, 0usize..6, "[a-z]{0,16}( [a-z]{1,8}){0,3}"),
            0..10,
        ),
    ) {
        let mut diagram = Diagram::new(DiagramStyle::default());
        let handles: Vec<_> = names
            .iter()
            .map(|name| diagram.add_participant(Some(Label::new(name.clone())), None))
            .collect();
        for (from, to, text) in &messages {
            let from = handles[from % handles.len()];
            let to = handles[to % handles.len()];
            let line = diagram.line(from, to);
            if !text.trim().is_empty() {
                line.label(Label::new(text.trim().to_string()));
            }
        }

        let engine = LayoutEngine::new();
        let layout = engine
            .compute(&diagram, &mut MonospaceMeasurer::default())
            .unwrap();

        // Lifelines never cross.
        let centers: Vec<f32> = layout.participants().iter().map(|p| p.center_x()).collect();
        prop_assert!(centers.windows(2).all(|pair| pair[0] < pair[1]));

        // Everything fits in the reported canvas.
        let size = layout.size();
        for row in layout.rows() {
            let bounds = row.bounds();
            prop_assert!(bounds.min_x() >= -0.01);
            prop_assert!(bounds.max_x() <= size.width() + 0.01);
            prop_assert!(bounds.max_y() <= size.height() + 0.01);
        }

        // Same scene, same layout.
        let again = engine
            .compute(&diagram, &mut MonospaceMeasurer::default())
            .unwrap();
        prop_assert_eq!(layout, again);
    }
}
