//! The sequence diagram scene model.
//!
//! # Overview
//!
//! - [`Diagram`]: An ordered collection of participants and rows, generic
//!   over the content type `C` measured by a
//!   [`Measurer`](crate::measure::Measurer).
//! - [`Participant`]: A cheap copyable handle to a participant, ordered by
//!   creation.
//! - [`RowItem`]: The closed set of things a row can hold: lines, self
//!   lines, anchored notes, and spanning notes.
//! - [`LineBuilder`]: Fluent configuration of the most recently added line.
//!
//! The scene is purely declarative: building one performs no measurement
//! or placement. Rows stack top to bottom in insertion order; the layout
//! engine consumes the scene read-only, so a scene can be laid out many
//! times (e.g. once per style or direction).

use crate::{error::DiagramError, style::DiagramStyle, style::LineStyle};

/// A handle to a participant within a [`Diagram`].
///
/// Handles are ordered by creation: the first participant added compares
/// before the second, and so on. A handle is only meaningful for the
/// diagram that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Participant {
    index: usize,
}

impl Participant {
    /// Returns the creation index of this participant.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns true if the two participants are next to each other in
    /// creation order.
    pub fn is_adjacent_to(&self, other: Participant) -> bool {
        self.index.abs_diff(other.index) == 1
    }

    /// Returns true if this participant was created before `other`.
    pub fn is_before(&self, other: Participant) -> bool {
        self.index < other.index
    }
}

/// Which side of a participant's lifeline an anchored item sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// To the left of the lifeline, right edge toward it
    Start,
    /// Centered on the lifeline
    Over,
    /// To the right of the lifeline, left edge toward it
    End,
}

/// A participant's optional top and bottom labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantSpec<C> {
    top_label: Option<C>,
    bottom_label: Option<C>,
}

impl<C> ParticipantSpec<C> {
    /// Returns the label above the lifeline, if any.
    pub fn top_label(&self) -> Option<&C> {
        self.top_label.as_ref()
    }

    /// Returns the label below the lifeline, if any.
    pub fn bottom_label(&self) -> Option<&C> {
        self.bottom_label.as_ref()
    }
}

/// One row of the diagram.
///
/// This is deliberately a closed set: the layout solver and renderer
/// both match exhaustively on it, so adding a row kind is a deliberate
/// API change rather than a silent extension point.
#[derive(Debug, Clone, PartialEq)]
pub enum RowItem<C> {
    /// A horizontal message arrow between two distinct participants.
    Line {
        from: Participant,
        to: Participant,
        style: LineStyle,
        label: Option<C>,
    },
    /// A self-call loop attached to one lifeline.
    LineToSelf {
        participant: Participant,
        style: LineStyle,
        label: Option<C>,
    },
    /// A note anchored to a single participant.
    Note {
        participant: Participant,
        alignment: Alignment,
        content: C,
    },
    /// A note stretching across two or more participants' lifelines.
    SpanningNote { participants: Vec<Participant>, content: C },
}

impl<C> RowItem<C> {
    /// Returns true if the row occupies a single grid column, i.e. it is
    /// anchored to one participant or connects adjacent ones.
    pub fn is_single_column(&self) -> bool {
        match self {
            RowItem::Line { from, to, .. } => from.is_adjacent_to(*to),
            RowItem::LineToSelf { .. } | RowItem::Note { .. } => true,
            RowItem::SpanningNote { .. } => false,
        }
    }

    /// Returns the row's text content, if it has one.
    pub fn content(&self) -> Option<&C> {
        match self {
            RowItem::Line { label, .. } | RowItem::LineToSelf { label, .. } => label.as_ref(),
            RowItem::Note { content, .. } | RowItem::SpanningNote { content, .. } => Some(content),
        }
    }
}

/// An ordered sequence diagram scene.
///
/// `C` is the content type for all labels; the layout engine measures it
/// through a [`Measurer`](crate::measure::Measurer), so the scene itself
/// never needs to know what the content is.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram<C> {
    style: DiagramStyle,
    participants: Vec<ParticipantSpec<C>>,
    rows: Vec<RowItem<C>>,
}

impl<C> Diagram<C> {
    /// Creates an empty diagram with the given style.
    pub fn new(style: DiagramStyle) -> Self {
        Self {
            style,
            participants: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Returns the diagram style.
    pub fn style(&self) -> &DiagramStyle {
        &self.style
    }

    /// Returns the participants in creation order.
    pub fn participants(&self) -> &[ParticipantSpec<C>] {
        &self.participants
    }

    /// Returns the rows in insertion (top-to-bottom) order.
    pub fn rows(&self) -> &[RowItem<C>] {
        &self.rows
    }

    /// Adds a participant with optional labels above and below its
    /// lifeline, returning a handle to it.
    ///
    /// Participants order left to right (in a left-to-right diagram) by
    /// creation.
    pub fn add_participant(&mut self, top_label: Option<C>, bottom_label: Option<C>) -> Participant {
        self.participants.push(ParticipantSpec {
            top_label,
            bottom_label,
        });
        Participant {
            index: self.participants.len() - 1,
        }
    }

    /// Adds a participant showing the same label above and below its
    /// lifeline.
    pub fn add_participant_labeled(&mut self, label: C) -> Participant
    where
        C: Clone,
    {
        self.add_participant(Some(label.clone()), Some(label))
    }

    /// Adds a message line between two participants and returns a builder
    /// for styling and labeling it.
    ///
    /// When `from` and `to` are the same participant the row becomes a
    /// self-call loop.
    pub fn line(&mut self, from: Participant, to: Participant) -> LineBuilder<'_, C> {
        let row = if from == to {
            RowItem::LineToSelf {
                participant: from,
                style: LineStyle::new(),
                label: None,
            }
        } else {
            RowItem::Line {
                from,
                to,
                style: LineStyle::new(),
                label: None,
            }
        };
        self.rows.push(row);

        let row = self
            .rows
            .last_mut()
            .expect("row list cannot be empty after push");
        LineBuilder { row }
    }

    /// Adds a note to the left of a participant's lifeline.
    pub fn note_to_start_of(&mut self, participant: Participant, content: C) {
        self.rows.push(RowItem::Note {
            participant,
            alignment: Alignment::Start,
            content,
        });
    }

    /// Adds a note to the right of a participant's lifeline.
    pub fn note_to_end_of(&mut self, participant: Participant, content: C) {
        self.rows.push(RowItem::Note {
            participant,
            alignment: Alignment::End,
            content,
        });
    }

    /// Adds a note over one or more participants.
    ///
    /// With a single participant the note is centered on its lifeline;
    /// with several it stretches from the first to the last of them.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::InvalidArgument`] if `participants` is
    /// empty.
    pub fn note_over(
        &mut self,
        participants: &[Participant],
        content: C,
    ) -> Result<(), DiagramError> {
        match participants {
            [] => Err(DiagramError::InvalidArgument(
                "note_over requires at least one participant".to_string(),
            )),
            [single] => {
                self.rows.push(RowItem::Note {
                    participant: *single,
                    alignment: Alignment::Over,
                    content,
                });
                Ok(())
            }
            several => {
                self.rows.push(RowItem::SpanningNote {
                    participants: several.to_vec(),
                    content,
                });
                Ok(())
            }
        }
    }

    /// Removes all participants and rows, keeping the style.
    pub fn clear(&mut self) {
        self.participants.clear();
        self.rows.clear();
    }

    /// Returns a copy of the diagram with every content value passed
    /// through `f`, keeping structure and style. The layout engine uses
    /// this to fill unset content styling from the diagram style.
    pub(crate) fn map_content(&self, mut f: impl FnMut(&C) -> C) -> Diagram<C> {
        Diagram {
            style: self.style.clone(),
            participants: self
                .participants
                .iter()
                .map(|spec| ParticipantSpec {
                    top_label: spec.top_label.as_ref().map(&mut f),
                    bottom_label: spec.bottom_label.as_ref().map(&mut f),
                })
                .collect(),
            rows: self
                .rows
                .iter()
                .map(|row| match row {
                    RowItem::Line {
                        from,
                        to,
                        style,
                        label,
                    } => RowItem::Line {
                        from: *from,
                        to: *to,
                        style: style.clone(),
                        label: label.as_ref().map(&mut f),
                    },
                    RowItem::LineToSelf {
                        participant,
                        style,
                        label,
                    } => RowItem::LineToSelf {
                        participant: *participant,
                        style: style.clone(),
                        label: label.as_ref().map(&mut f),
                    },
                    RowItem::Note {
                        participant,
                        alignment,
                        content,
                    } => RowItem::Note {
                        participant: *participant,
                        alignment: *alignment,
                        content: f(content),
                    },
                    RowItem::SpanningNote {
                        participants,
                        content,
                    } => RowItem::SpanningNote {
                        participants: participants.clone(),
                        content: f(content),
                    },
                })
                .collect(),
        }
    }
}

impl<C> Default for Diagram<C> {
    fn default() -> Self {
        Self::new(DiagramStyle::default())
    }
}

/// Fluent configuration of a just-added line.
///
/// Obtained from [`Diagram::line`]; the row is already part of the
/// diagram, so dropping the builder without calling anything leaves an
/// unlabeled line with the diagram's default style.
pub struct LineBuilder<'a, C> {
    row: &'a mut RowItem<C>,
}

impl<'a, C> LineBuilder<'a, C> {
    /// Merges `style` onto the line's current style. Properties set in
    /// `style` win; repeated calls make the last write win per property.
    pub fn style(self, style: LineStyle) -> Self {
        match self.row {
            RowItem::Line { style: current, .. } | RowItem::LineToSelf { style: current, .. } => {
                *current = style.fill_missing_from(current);
            }
            // line() only ever hands out builders for line rows.
            RowItem::Note { .. } | RowItem::SpanningNote { .. } => {}
        }
        self
    }

    /// Sets the line's label, replacing any previous one.
    pub fn label(self, content: C) -> Self {
        match self.row {
            RowItem::Line { label, .. } | RowItem::LineToSelf { label, .. } => {
                *label = Some(content);
            }
            RowItem::Note { .. } | RowItem::SpanningNote { .. } => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use sequin_core::color::Color;

    use super::*;

    fn two_participant_diagram() -> (Diagram<String>, Participant, Participant) {
        let mut diagram = Diagram::default();
        let a = diagram.add_participant(Some("A".to_string()), None);
        let b = diagram.add_participant(Some("B".to_string()), None);
        (diagram, a, b)
    }

    #[test]
    fn test_participants_ordered_by_creation() {
        let (_, a, b) = two_participant_diagram();
        assert!(a.is_before(b));
        assert!(a.is_adjacent_to(b));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
    }

    #[test]
    fn test_add_participant_labeled_sets_both_labels() {
        let mut diagram: Diagram<String> = Diagram::default();
        diagram.add_participant_labeled("db".to_string());

        let spec = &diagram.participants()[0];
        assert_eq!(spec.top_label().map(String::as_str), Some("db"));
        assert_eq!(spec.bottom_label().map(String::as_str), Some("db"));
    }

    #[test]
    fn test_line_between_distinct_participants() {
        let (mut diagram, a, b) = two_participant_diagram();
        diagram.line(a, b).label("hello".to_string());

        assert_eq!(diagram.rows().len(), 1);
        match &diagram.rows()[0] {
            RowItem::Line {
                from, to, label, ..
            } => {
                assert_eq!(*from, a);
                assert_eq!(*to, b);
                assert_eq!(label.as_deref(), Some("hello"));
            }
            other => panic!("expected Line, got {other:?}"),
        }
    }

    #[test]
    fn test_line_to_same_participant_becomes_self_loop() {
        let (mut diagram, a, _) = two_participant_diagram();
        diagram.line(a, a);

        assert!(matches!(
            diagram.rows()[0],
            RowItem::LineToSelf { participant, .. } if participant == a
        ));
    }

    #[test]
    fn test_line_style_merge_last_write_wins() {
        let (mut diagram, a, b) = two_participant_diagram();
        let red = Color::new("red").unwrap();
        let green = Color::new("green").unwrap();

        diagram
            .line(a, b)
            .style(LineStyle::new().with_color(red).with_width(1.0))
            .style(LineStyle::new().with_color(green));

        match &diagram.rows()[0] {
            RowItem::Line { style, .. } => {
                assert_eq!(style.color(), Some(green));
                assert_eq!(style.width(), Some(1.0));
            }
            other => panic!("expected Line, got {other:?}"),
        }
    }

    #[test]
    fn test_notes_anchor_to_participants() {
        let (mut diagram, a, b) = two_participant_diagram();
        diagram.note_to_start_of(a, "left".to_string());
        diagram.note_to_end_of(b, "right".to_string());

        assert!(matches!(
            &diagram.rows()[0],
            RowItem::Note { alignment: Alignment::Start, .. }
        ));
        assert!(matches!(
            &diagram.rows()[1],
            RowItem::Note { alignment: Alignment::End, .. }
        ));
    }

    #[test]
    fn test_note_over_single_collapses_to_anchored_note() {
        let (mut diagram, a, _) = two_participant_diagram();
        diagram.note_over(&[a], "solo".to_string()).unwrap();

        assert!(matches!(
            &diagram.rows()[0],
            RowItem::Note { alignment: Alignment::Over, participant, .. } if *participant == a
        ));
    }

    #[test]
    fn test_note_over_many_becomes_spanning() {
        let (mut diagram, a, b) = two_participant_diagram();
        diagram.note_over(&[a, b], "wide".to_string()).unwrap();

        match &diagram.rows()[0] {
            RowItem::SpanningNote { participants, .. } => {
                assert_eq!(participants.len(), 2);
            }
            other => panic!("expected SpanningNote, got {other:?}"),
        }
    }

    #[test]
    fn test_note_over_empty_is_error() {
        let (mut diagram, _, _) = two_participant_diagram();
        let result = diagram.note_over(&[], "nobody".to_string());
        assert!(matches!(result, Err(DiagramError::InvalidArgument(_))));
    }

    #[test]
    fn test_single_column_classification() {
        let mut diagram: Diagram<String> = Diagram::default();
        let a = diagram.add_participant(None, None);
        let b = diagram.add_participant(None, None);
        let c = diagram.add_participant(None, None);

        diagram.line(a, b);
        diagram.line(a, c);
        diagram.line(c, c);

        assert!(diagram.rows()[0].is_single_column());
        assert!(!diagram.rows()[1].is_single_column());
        assert!(diagram.rows()[2].is_single_column());
    }

    #[test]
    fn test_clear_keeps_style() {
        let (mut diagram, a, b) = two_participant_diagram();
        diagram.line(a, b);
        let style = diagram.style().clone();

        diagram.clear();
        assert!(diagram.participants().is_empty());
        assert!(diagram.rows().is_empty());
        assert_eq!(*diagram.style(), style);
    }
}
