//! Filled and stroked primitives of a chord diagram.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

/// A filled circle marking a fretted string.
///
/// Rendered centered on its position, on the [`RenderLayer::Marker`] layer.
#[derive(Debug, Clone)]
pub struct Dot {
    radius: f32,
    fill: Color,
}

impl Dot {
    pub fn new(radius: f32, fill: Color) -> Self {
        Self { radius, fill }
    }
}

impl Drawable for Dot {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let circle = svg_element::Circle::new()
            .set("data-role", "dot")
            .set("cx", position.x())
            .set("cy", position.y())
            .set("r", self.radius)
            .set("fill", &self.fill)
            .set("fill-opacity", self.fill.alpha());

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Marker, Box::new(circle));
        output
    }
}

/// A rounded block drawn under the strings covered by a barre.
///
/// Rendered centered on its position, on the [`RenderLayer::Barre`] layer.
/// The corner radius equals half the block height, giving round ends.
#[derive(Debug, Clone)]
pub struct BarreBlock {
    size: Size,
    fill: Color,
}

impl BarreBlock {
    pub fn new(size: Size, fill: Color) -> Self {
        Self { size, fill }
    }
}

impl Drawable for BarreBlock {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let bounds = position.to_bounds(self.size);
        let corner = self.size.height() / 2.0;
        let rect = svg_element::Rectangle::new()
            .set("data-role", "barre")
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", corner)
            .set("ry", corner)
            .set("fill", &self.fill)
            .set("fill-opacity", self.fill.alpha());

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Barre, Box::new(rect));
        output
    }
}

/// Direction of a [`GridLine`] from its start point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Extends to the right
    Horizontal,
    /// Extends downward
    Vertical,
}

/// What a grid line represents, exposed as the `data-role` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    String,
    Fret,
    Nut,
}

impl LineKind {
    fn role(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Fret => "fret",
            Self::Nut => "nut",
        }
    }
}

/// A straight stroked line starting at its position.
#[derive(Debug, Clone)]
pub struct GridLine {
    kind: LineKind,
    orientation: Orientation,
    length: f32,
    stroke: StrokeDefinition,
}

impl GridLine {
    pub fn new(
        kind: LineKind,
        orientation: Orientation,
        length: f32,
        stroke: StrokeDefinition,
    ) -> Self {
        Self {
            kind,
            orientation,
            length,
            stroke,
        }
    }

    fn end_point(&self, start: Point) -> Point {
        match self.orientation {
            Orientation::Horizontal => start.with_x(start.x() + self.length),
            Orientation::Vertical => start.with_y(start.y() + self.length),
        }
    }
}

impl Drawable for GridLine {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let end = self.end_point(position);
        let line = svg_element::Line::new()
            .set("data-role", self.kind.role())
            .set("x1", position.x())
            .set("y1", position.y())
            .set("x2", end.x())
            .set("y2", end.y());
        let line = apply_stroke!(line, &self.stroke);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Grid, Box::new(line));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(drawable: &dyn Drawable, position: Point) -> String {
        drawable
            .render_to_layers(position)
            .render()
            .into_iter()
            .map(|node| node.to_string())
            .collect()
    }

    #[test]
    fn test_dot_renders_centered_circle() {
        let dot = Dot::new(10.0, Color::default());
        let svg = render_to_string(&dot, Point::new(50.0, 95.0));
        assert!(svg.contains("data-layer=\"marker\""));
        assert!(svg.contains("cx=\"50\""));
        assert!(svg.contains("cy=\"95\""));
        assert!(svg.contains("r=\"10\""));
        assert!(svg.contains("fill=\"#000000\""));
    }

    #[test]
    fn test_barre_block_bounds() {
        let block = BarreBlock::new(Size::new(170.0, 20.0), Color::new("darkgray").unwrap());
        let svg = render_to_string(&block, Point::new(95.0, 100.0));
        assert!(svg.contains("data-layer=\"barre\""));
        assert!(svg.contains("x=\"10\""));
        assert!(svg.contains("y=\"90\""));
        assert!(svg.contains("width=\"170\""));
        assert!(svg.contains("rx=\"10\""));
        assert!(svg.contains("fill=\"#a9a9a9\""));
    }

    #[test]
    fn test_grid_line_end_points() {
        let stroke = StrokeDefinition::solid(Color::default(), 2.0);
        let vertical = GridLine::new(LineKind::String, Orientation::Vertical, 150.0, stroke.clone());
        let svg = render_to_string(&vertical, Point::new(20.0, 80.0));
        assert!(svg.contains("data-role=\"string\""));
        assert!(svg.contains("x2=\"20\""));
        assert!(svg.contains("y2=\"230\""));

        let nut = GridLine::new(LineKind::Nut, Orientation::Horizontal, 150.0, stroke.with_width(6.0));
        let svg = render_to_string(&nut, Point::new(20.0, 80.0));
        assert!(svg.contains("data-role=\"nut\""));
        assert!(svg.contains("x2=\"170\""));
        assert!(svg.contains("stroke-width=\"6\""));
    }
}
