//! Content measurement pass.
//!
//! Measures every registered content exactly once: participant labels get
//! a full unconstrained measurement (their size never depends on the
//! grid), rows get their intrinsic widths collected so the column solver
//! can work without touching the measurer again.

use sequin_core::geometry::{Constraints, Size};

use crate::{
    error::DiagramError,
    layout::{ARROW_HEAD_WIDTH, balanced_max_width},
    measure::Measurer,
    scene::{Alignment, Diagram, RowItem},
    style::DiagramStyle,
};

/// Measured sizes for one participant's labels.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParticipantMetrics {
    pub(crate) top: Option<Size>,
    pub(crate) bottom: Option<Size>,
}

impl ParticipantMetrics {
    /// The widest of the participant's labels; zero when unlabeled.
    pub(crate) fn label_width(&self) -> f32 {
        let top = self.top.map_or(0.0, Size::width);
        let bottom = self.bottom.map_or(0.0, Size::width);
        top.max(bottom)
    }

    pub(crate) fn top_height(&self) -> f32 {
        self.top.map_or(0.0, Size::height)
    }

    pub(crate) fn bottom_height(&self) -> f32 {
        self.bottom.map_or(0.0, Size::height)
    }
}

/// Intrinsic widths for one row.
#[derive(Debug, Clone)]
pub(crate) struct RowIntrinsics {
    /// The composite width the row asks of its column, excluding the
    /// breathing room the column solver adds around off-lifeline items.
    pub(crate) width: f32,
    /// Narrowest width the row's content can wrap into.
    pub(crate) content_min: f32,
    /// Wrapping cap for the row's content, after balancing. Infinite for
    /// rows without content.
    pub(crate) content_max: f32,
}

/// Measures participant labels and collects row intrinsics.
///
/// # Errors
///
/// Returns [`DiagramError::InternalInvariant`] if the number of measured
/// contents does not match the number registered in the scene.
pub(crate) fn measure_scene<C, M: Measurer<C>>(
    diagram: &Diagram<C>,
    measurer: &mut M,
    style: &DiagramStyle,
) -> Result<(Vec<ParticipantMetrics>, Vec<RowIntrinsics>), DiagramError> {
    let registered = registered_content_count(diagram);
    let mut consumed = 0usize;

    let mut participants = Vec::with_capacity(diagram.participants().len());
    for spec in diagram.participants() {
        let mut measure_label = |content: Option<&C>| {
            content.map(|content| {
                consumed += 1;
                measurer.measure(content, Constraints::unbounded())
            })
        };
        let top = measure_label(spec.top_label());
        let bottom = measure_label(spec.bottom_label());
        participants.push(ParticipantMetrics { top, bottom });
    }

    let mut rows = Vec::with_capacity(diagram.rows().len());
    for row in diagram.rows() {
        let content_widths = row.content().map(|content| {
            consumed += 1;
            (
                measurer.min_intrinsic_width(content),
                measurer.max_intrinsic_width(content),
            )
        });
        rows.push(row_intrinsics(row, content_widths, style));
    }

    if consumed != registered {
        return Err(DiagramError::InternalInvariant(format!(
            "measured {consumed} contents but the scene registered {registered}"
        )));
    }

    Ok((participants, rows))
}

fn registered_content_count<C>(diagram: &Diagram<C>) -> usize {
    let participant_labels: usize = diagram
        .participants()
        .iter()
        .map(|spec| spec.top_label().is_some() as usize + spec.bottom_label().is_some() as usize)
        .sum();
    let row_contents = diagram
        .rows()
        .iter()
        .filter(|row| row.content().is_some())
        .count();
    participant_labels + row_contents
}

fn row_intrinsics<C>(
    row: &RowItem<C>,
    content_widths: Option<(f32, f32)>,
    style: &DiagramStyle,
) -> RowIntrinsics {
    let (content_min, natural_max) = content_widths.unwrap_or((0.0, f32::INFINITY));
    // Spanning rows are sized against lifeline distance, not content, so
    // balancing them would only push lifelines around for nothing.
    let content_max = if style.balance_labels() && row.is_single_column() {
        balanced_max_width(content_min, natural_max)
    } else {
        natural_max
    };

    let label_padding = style.label_padding();
    let width = match row {
        RowItem::Line { label, .. } => {
            let label_width = if label.is_some() {
                content_max + 2.0 * label_padding
            } else {
                0.0
            };
            label_width.max(ARROW_HEAD_WIDTH)
        }
        RowItem::LineToSelf { label, .. } => {
            let loop_width = 2.0 * ARROW_HEAD_WIDTH;
            if label.is_some() {
                loop_width + label_padding + content_max
            } else {
                loop_width
            }
        }
        RowItem::Note { alignment, .. } => {
            let anchored_side = match alignment {
                Alignment::Start | Alignment::End => label_padding,
                Alignment::Over => 0.0,
            };
            content_max + anchored_side
        }
        // Spanning rows never contribute to a single column; their width
        // is resolved against lifeline positions later.
        RowItem::SpanningNote { .. } => content_max,
    };

    RowIntrinsics {
        width,
        content_min,
        content_max,
    }
}
