//! Sequence diagram layout and SVG rendering.
//!
//! # Overview
//!
//! - [`scene`]: Build a [`Diagram`] out of participants, message lines,
//!   and notes.
//! - [`measure`]: Content measurement behind the [`Measurer`] trait, with
//!   a font-backed and a deterministic monospace implementation.
//! - [`layout`]: The constraint solver turning a scene into pure geometry.
//! - [`render`](mod@render): SVG output from a scene plus its layout.
//! - [`style`] and [`config`]: Visual styling and its serde-friendly
//!   configuration form.
//!
//! # Example
//!
//! ```
//! use sequin::{Diagram, DiagramStyle, Label, MonospaceMeasurer, render_diagram};
//!
//! let mut diagram = Diagram::new(DiagramStyle::default());
//! let client = diagram.add_participant(Some(Label::new("client")), None);
//! let server = diagram.add_participant(Some(Label::new("server")), None);
//! diagram.line(client, server).label(Label::new("request"));
//! diagram.line(server, client).label(Label::new("response"));
//!
//! let svg = render_diagram(&diagram, &mut MonospaceMeasurer::default()).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

use log::info;

pub mod config;
pub mod error;
pub mod layout;
pub mod measure;
pub mod render;
pub mod scene;
pub mod style;

// Drawing primitives shared with custom renderers.
pub use sequin_core::{color, draw, geometry};

pub use config::StyleConfig;
pub use error::DiagramError;
pub use layout::{Layout, LayoutEngine};
pub use measure::{Label, Measurer, MonospaceMeasurer, StyleDefaults};
pub use render::{render, render_to_size};
pub use scene::{Diagram, Participant};
pub use style::{ArrowHead, DiagramStyle, LayoutDirection, LineStyle};

/// Re-exported font-backed measurer; implements [`Measurer`] for [`Label`].
pub use sequin_core::draw::TextMeasurer;

/// Lays out and renders a diagram to an SVG string in one step.
///
/// # Errors
///
/// Returns [`DiagramError`] when layout solving fails; see
/// [`LayoutEngine::compute`].
pub fn render_diagram(
    diagram: &Diagram<Label>,
    measurer: &mut impl Measurer<Label>,
) -> Result<String, DiagramError> {
    let layout = LayoutEngine::new().compute(diagram, measurer)?;
    info!(
        participants = diagram.participants().len(),
        rows = diagram.rows().len(),
        width = layout.size().width(),
        height = layout.size().height();
        "diagram laid out"
    );
    Ok(render::render(diagram, &layout).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_diagram_end_to_end() {
        let mut diagram = Diagram::new(DiagramStyle::default());
        let a = diagram.add_participant(Some(Label::new("a")), None);
        let b = diagram.add_participant(Some(Label::new("b")), None);
        diagram.line(a, b).label(Label::new("ping"));

        let svg = render_diagram(&diagram, &mut MonospaceMeasurer::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("ping"));
    }

    #[test]
    fn test_render_diagram_empty_scene() {
        let diagram: Diagram<Label> = Diagram::default();
        let svg = render_diagram(&diagram, &mut MonospaceMeasurer::default()).unwrap();
        assert!(svg.starts_with("<svg"));
    }
}
