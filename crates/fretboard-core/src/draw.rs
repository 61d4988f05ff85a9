//! Drawable components for fretboard diagrams.
//!
//! Every drawable implements [`Drawable`], rendering itself at a position into
//! a [`LayeredOutput`]. Layers decide the stacking order of the final scene,
//! so a drawable never depends on the order in which it was emitted.

mod layer;
mod shape;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use shape::{BarreBlock, Dot, GridLine, LineKind, Orientation};
pub use stroke::StrokeDefinition;
pub use text::{ResolvedFont, Text, TextAnchor, TextDefinition, TextMetrics};

use crate::geometry::Point;

/// A visual element that can be placed on the diagram canvas.
pub trait Drawable: std::fmt::Debug {
    /// Renders the element at `position` into layered SVG nodes.
    ///
    /// What `position` refers to (center, start point, anchor) is defined by
    /// each implementation.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;
}
