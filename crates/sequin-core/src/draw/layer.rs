//! Layer-based rendering system for SVG output.
//!
//! Drawing a sequence diagram interleaves elements that must stack in a
//! fixed z-order regardless of the order they are produced in: lifelines
//! go behind note backgrounds, which go behind arrows, which go behind
//! text. [`LayeredOutput`] collects SVG nodes tagged with a
//! [`RenderLayer`] and emits them grouped and sorted.

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// Layers are rendered from bottom to top in the order defined by variant
/// declaration. The `Ord` derive uses declaration order, so the first
/// variant renders first (bottom) and the last renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Diagram background fill and label-backing rectangles
    Background,
    /// Vertical participant lifelines
    Lifeline,
    /// Note boxes (fills and borders)
    Note,
    /// Message arrows and self-call loops
    Arrow,
    /// Text labels
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Lifeline => "lifeline",
            Self::Note => "note",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }
}

/// SVG nodes grouped by rendering layer.
///
/// Nodes can be added in any order; [`render`](Self::render) emits one
/// `<g data-layer="...">` group per populated layer, sorted bottom to top.
/// Within a layer, insertion order is preserved.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each populated layer becomes an SVG `<g>` element with a
    /// `data-layer` attribute identifying the layer; empty layers produce
    /// no group. The sort is stable, so nodes within a layer keep the
    /// order they were added in.
    pub fn render(mut self) -> Vec<SvgNode> {
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result: Vec<SvgNode> = Vec::new();
        let mut open: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            open = Some(match open {
                Some((current, group)) if current == layer => (current, group.add(node)),
                Some((_, group)) => {
                    result.push(Box::new(group));
                    let fresh = svg_element::Group::new().set("data-layer", layer.name());
                    (layer, fresh.add(node))
                }
                None => {
                    let fresh = svg_element::Group::new().set("data-layer", layer.name());
                    (layer, fresh.add(node))
                }
            });
        }

        if let Some((_, group)) = open {
            result.push(Box::new(group));
        }

        result
    }
}
