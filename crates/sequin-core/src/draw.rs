//! Drawing primitives shared by diagram renderers.
//!
//! # Overview
//!
//! - [`StrokeDefinition`] and friends: line styling mapped to SVG attributes.
//! - [`RenderLayer`] / [`LayeredOutput`]: z-ordered collection of SVG nodes.
//! - [`TextDefinition`] / [`TextMeasurer`]: font styling and text measurement
//!   backed by `cosmic-text`.

mod layer;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{TextDefinition, TextMeasurer};
