//! Layer-based composition of the diagram scene.
//!
//! Drawables declare which [`RenderLayer`] their SVG nodes belong to. When the
//! collected [`LayeredOutput`] is rendered, nodes are grouped per layer and
//! emitted bottom to top, which is what keeps finger dots above barre blocks
//! and finger numbers above dots.
//!
//! # Example
//!
//! ```
//! # use fretboard_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Circle, Rectangle};
//! let mut output = LayeredOutput::new();
//!
//! // Emitted first, but drawn above the barre
//! output.add_to_layer(RenderLayer::Marker, Box::new(Circle::new()));
//! output.add_to_layer(RenderLayer::Barre, Box::new(Rectangle::new()));
//!
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Stacking layers of a chord diagram, bottom first.
///
/// The derived `Ord` follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas fill
    Background,
    /// String and fret lines, including the nut
    Grid,
    /// Barre blocks
    Barre,
    /// Finger dots
    Marker,
    /// Chord name, fret label, open/mute letters and finger numbers
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Grid => "grid",
            Self::Barre => "barre",
            Self::Marker => "marker",
            Self::Text => "text",
        }
    }
}

/// SVG nodes collected per layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to `layer`, after any node already on that layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Moves all nodes of `other` into this output.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes on `layer`.
    pub fn count(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Renders the layers to SVG groups, bottom layer first.
    ///
    /// Each non-empty layer becomes a `<g data-layer="...">` element. Within a
    /// layer, nodes keep their insertion order.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order inside a layer.
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = layer_group(current_layer);

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);
                current_layer = layer;
                current_group = layer_group(layer);
            }
            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);
        result
    }
}

fn layer_group(layer: RenderLayer) -> svg_element::Group {
    svg_element::Group::new().set("data-layer", layer.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg::node::element::{Circle, Rectangle};

    #[test]
    fn test_layered_output_new_is_empty() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layered_output_count_per_layer() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Marker, Box::new(Circle::new()));
        output.add_to_layer(RenderLayer::Marker, Box::new(Circle::new()));
        output.add_to_layer(RenderLayer::Barre, Box::new(Rectangle::new()));

        assert_eq!(output.count(RenderLayer::Marker), 2);
        assert_eq!(output.count(RenderLayer::Barre), 1);
        assert_eq!(output.count(RenderLayer::Text), 0);
    }

    #[test]
    fn test_layered_output_merge_same_layer_single_group() {
        let mut first = LayeredOutput::new();
        first.add_to_layer(RenderLayer::Grid, Box::new(Rectangle::new()));

        let mut second = LayeredOutput::new();
        second.add_to_layer(RenderLayer::Grid, Box::new(Rectangle::new()));

        first.merge(second);
        assert_eq!(first.render().len(), 1);
    }

    #[test]
    fn test_layered_output_renders_bottom_layer_first() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Marker, Box::new(Circle::new()));
        output.add_to_layer(RenderLayer::Barre, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));

        let rendered: Vec<String> = output
            .render()
            .into_iter()
            .map(|node| node.to_string())
            .collect();

        let order: Vec<&str> = ["background", "barre", "marker", "text"].to_vec();
        assert_eq!(rendered.len(), order.len());
        for (group, name) in rendered.iter().zip(order) {
            assert!(
                group.contains(&format!("data-layer=\"{name}\"")),
                "expected layer {name} in {group}"
            );
        }
    }
}
