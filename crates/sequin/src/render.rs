//! SVG rendering of solved layouts.
//!
//! # Overview
//!
//! - [`render`]: Turns a [`Diagram`] and its [`Layout`] into an
//!   [`svg::Document`] at natural size.
//! - [`render_to_size`]: Same, but shrunk uniformly to fit a viewport.
//!   Diagrams smaller than the viewport are never scaled up.
//!
//! Rendering walks the scene and the layout side by side: the layout
//! provides pure geometry, the scene provides the text and styling that
//! the geometry was solved for. Output is z-ordered through
//! [`LayeredOutput`], so lifelines always sit behind notes, notes behind
//! arrows, and arrows behind text, regardless of row order.

use svg::Document;
use svg::node::element as svg_element;

use sequin_core::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer},
    geometry::{Bounds, Size},
};

use crate::{
    layout::{ARROW_HEAD_HEIGHT, ARROW_HEAD_WIDTH, Layout, RowVisual},
    measure::Label,
    scene::{Diagram, RowItem},
    style::{ArrowHead, DiagramStyle, LayoutDirection, LineStyle},
};

/// Renders a diagram at its natural size.
pub fn render(diagram: &Diagram<Label>, layout: &Layout) -> Document {
    document(diagram, layout, layout.size())
}

/// Renders a diagram shrunk to fit `viewport`, preserving aspect ratio.
///
/// The scale factor is capped at 1.0: a diagram that already fits is
/// rendered at natural size rather than stretched.
pub fn render_to_size(diagram: &Diagram<Label>, layout: &Layout, viewport: Size) -> Document {
    let size = layout.size();
    let scale = if size.width() > 0.0 && size.height() > 0.0 {
        (viewport.width() / size.width())
            .min(viewport.height() / size.height())
            .min(1.0)
    } else {
        1.0
    };
    document(
        diagram,
        layout,
        Size::new(size.width() * scale, size.height() * scale),
    )
}

fn document(diagram: &Diagram<Label>, layout: &Layout, display: Size) -> Document {
    let size = layout.size();
    let mut doc = Document::new()
        .set("viewBox", (0.0, 0.0, size.width(), size.height()))
        .set("width", display.width())
        .set("height", display.height());

    for node in build_layers(diagram, layout).render() {
        doc = doc.add(node);
    }
    doc
}

fn build_layers(diagram: &Diagram<Label>, layout: &Layout) -> LayeredOutput {
    let style = diagram.style();
    let mut output = LayeredOutput::new();

    if let Some(background) = style.background() {
        let size = layout.size();
        output.add_to_layer(
            RenderLayer::Background,
            Box::new(
                svg_element::Rectangle::new()
                    .set("x", 0.0)
                    .set("y", 0.0)
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("fill", background.to_string()),
            ),
        );
    }

    render_participants(diagram, layout, style, &mut output);

    for (item, placed) in diagram.rows().iter().zip(layout.rows()) {
        let resolved = resolved_line_style(item, style);
        match placed.visual() {
            RowVisual::Arrow { forward } => {
                let head_at_right = forward != (layout.direction() == LayoutDirection::RightToLeft);
                render_arrow(placed.bounds(), head_at_right, &resolved, &mut output);
            }
            RowVisual::SelfArrow => {
                render_self_loop(placed.bounds(), layout.direction(), &resolved, &mut output);
            }
            RowVisual::Note | RowVisual::SpanningNote => {
                if let Some(content) = item.content() {
                    render_note(placed.bounds(), content, style, &mut output);
                }
            }
        }
        if let (Some(bounds), Some(content)) = (placed.label(), item.content()) {
            render_floating_label(bounds, content, style, &mut output);
        }
    }

    output
}

fn render_participants(
    diagram: &Diagram<Label>,
    layout: &Layout,
    style: &DiagramStyle,
    output: &mut LayeredOutput,
) {
    let lifeline_stroke = style.line_style().to_stroke();

    for (spec, placed) in diagram.participants().iter().zip(layout.participants()) {
        let line = svg_element::Line::new()
            .set("x1", placed.center_x())
            .set("y1", placed.lifeline_top())
            .set("x2", placed.center_x())
            .set("y2", placed.lifeline_bottom());
        output.add_to_layer(
            RenderLayer::Lifeline,
            Box::new(apply_stroke!(line, &lifeline_stroke)),
        );

        if let (Some(label), Some(bounds)) = (spec.top_label(), placed.top_label()) {
            output.add_to_layer(RenderLayer::Text, text_node(bounds, label, style));
        }
        if let (Some(label), Some(bounds)) = (spec.bottom_label(), placed.bottom_label()) {
            output.add_to_layer(RenderLayer::Text, text_node(bounds, label, style));
        }
    }
}

fn render_arrow(
    bounds: Bounds,
    head_at_right: bool,
    line_style: &LineStyle,
    output: &mut LayeredOutput,
) {
    let stroke = line_style.to_stroke();
    let y = bounds.max_y() - ARROW_HEAD_HEIGHT / 2.0;

    let line = svg_element::Line::new()
        .set("x1", bounds.min_x())
        .set("y1", y)
        .set("x2", bounds.max_x())
        .set("y2", y);
    output.add_to_layer(
        RenderLayer::Arrow,
        Box::new(apply_stroke!(line, &stroke)),
    );

    let (tip, back) = if head_at_right {
        (bounds.max_x(), bounds.max_x() - ARROW_HEAD_WIDTH)
    } else {
        (bounds.min_x(), bounds.min_x() + ARROW_HEAD_WIDTH)
    };
    output.add_to_layer(
        RenderLayer::Arrow,
        arrow_head(tip, back, y, line_style),
    );
}

fn render_self_loop(
    bounds: Bounds,
    direction: LayoutDirection,
    line_style: &LineStyle,
    output: &mut LayeredOutput,
) {
    let stroke = line_style.to_stroke();

    // The loop hangs off the lifeline on the reading side; after an RTL
    // mirror the lifeline edge is the box's right edge.
    let (lifeline_x, outer_x) = match direction {
        LayoutDirection::LeftToRight => {
            (bounds.min_x(), bounds.min_x() + 2.0 * ARROW_HEAD_WIDTH)
        }
        LayoutDirection::RightToLeft => {
            (bounds.max_x(), bounds.max_x() - 2.0 * ARROW_HEAD_WIDTH)
        }
    };

    let data = svg_element::path::Data::new()
        .move_to((lifeline_x, bounds.min_y()))
        .line_to((outer_x, bounds.min_y()))
        .line_to((outer_x, bounds.max_y()))
        .line_to((lifeline_x, bounds.max_y()));
    let path = svg_element::Path::new().set("d", data).set("fill", "none");
    output.add_to_layer(
        RenderLayer::Arrow,
        Box::new(apply_stroke!(path, &stroke)),
    );

    // The head points back into the lifeline at the bottom of the loop.
    let back = if outer_x > lifeline_x {
        lifeline_x + ARROW_HEAD_WIDTH
    } else {
        lifeline_x - ARROW_HEAD_WIDTH
    };
    output.add_to_layer(
        RenderLayer::Arrow,
        arrow_head(lifeline_x, back, bounds.max_y(), line_style),
    );
}

fn arrow_head(
    tip_x: f32,
    back_x: f32,
    y: f32,
    line_style: &LineStyle,
) -> Box<dyn svg::Node> {
    let points = format!(
        "{tip_x},{y} {back_x},{} {back_x},{}",
        y - ARROW_HEAD_HEIGHT / 2.0,
        y + ARROW_HEAD_HEIGHT / 2.0
    );
    let polygon = svg_element::Polygon::new().set("points", points);
    let color = line_style.to_stroke().color();

    match line_style.resolved_arrow_head() {
        ArrowHead::Filled => Box::new(
            polygon
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha()),
        ),
        ArrowHead::Outlined => {
            let stroke = line_style.to_stroke();
            Box::new(apply_stroke!(polygon.set("fill", "none"), &stroke))
        }
    }
}

fn render_note(
    bounds: Bounds,
    content: &Label,
    style: &DiagramStyle,
    output: &mut LayeredOutput,
) {
    let rect = svg_element::Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("fill", style.note_background().to_string());

    if content.is_boxed() {
        let border = sequin_core::draw::StrokeDefinition::new(
            style.line_style().to_stroke().color(),
            1.0,
        );
        output.add_to_layer(
            RenderLayer::Note,
            Box::new(apply_stroke!(rect, &border)),
        );
    } else {
        output.add_to_layer(RenderLayer::Note, Box::new(rect));
    }
    output.add_to_layer(RenderLayer::Text, text_node(bounds, content, style));
}

/// A label floating over other geometry (line labels): backed by a clear
/// rectangle so the arrow or lifeline underneath does not strike through
/// the text.
fn render_floating_label(
    bounds: Bounds,
    content: &Label,
    style: &DiagramStyle,
    output: &mut LayeredOutput,
) {
    let clear = svg_element::Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("fill", style.note_background().to_string());
    output.add_to_layer(RenderLayer::Note, Box::new(clear));
    output.add_to_layer(RenderLayer::Text, text_node(bounds, content, style));
}

/// Builds a centered, possibly multi-line `<text>` node for `label`
/// inside `bounds`. Labels without their own font configuration use the
/// diagram style's. Lines split at explicit `\n` only; wrapping was
/// already decided at measure time by re-measuring under the same
/// constraints, so layout and rendering agree on line breaks as long as
/// authors put explicit breaks where they want them.
fn text_node(bounds: Bounds, label: &Label, style: &DiagramStyle) -> Box<dyn svg::Node> {
    let definition = label.definition().unwrap_or(style.text());
    let line_height = definition.line_height();
    let lines: Vec<&str> = label.text().split('\n').collect();
    let total_height = lines.len() as f32 * line_height;

    // Every line is a tspan shifted down one line height, so the block
    // starts half a block above center minus one line it immediately
    // consumes.
    let anchor_y = bounds.center_y() - (total_height + line_height) / 2.0;

    let mut text = svg_element::Text::new("")
        .set("x", bounds.center_x())
        .set("y", anchor_y)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "central")
        .set("font-family", definition.font_family())
        .set("font-size", format!("{}pt", definition.font_size()));
    if let Some(color) = definition.color() {
        text = text.set("fill", color.to_string());
    }

    for line in lines {
        text = text.add(
            svg_element::TSpan::new(line)
                .set("x", bounds.center_x())
                .set("dy", line_height),
        );
    }

    Box::new(text)
}

fn resolved_line_style(item: &RowItem<Label>, style: &DiagramStyle) -> LineStyle {
    match item {
        RowItem::Line { style: own, .. } | RowItem::LineToSelf { style: own, .. } => {
            own.fill_missing_from(style.line_style())
        }
        RowItem::Note { .. } | RowItem::SpanningNote { .. } => style.line_style().clone(),
    }
}
