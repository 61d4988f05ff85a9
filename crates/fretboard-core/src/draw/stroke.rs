//! Stroke definitions for grid lines.
//!
//! # SVG Attribute Mapping
//!
//! | Property | SVG Attribute | Example Values |
//! |----------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#000000"`, `1` |
//! | `width` | `stroke-width` | `2.0` |
//!
//! Lines always use butt caps, so a line ends exactly at its endpoint.

use crate::color::Color;

/// Color and width of a stroked line.
///
/// # Examples
///
/// ```
/// use fretboard_core::draw::StrokeDefinition;
/// use fretboard_core::color::Color;
///
/// let grid = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0);
/// let nut = grid.with_width(6.0);
/// assert_eq!(nut.width(), 6.0);
/// assert_eq!(nut.color(), grid.color());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    /// Creates a solid stroke.
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Returns a copy of this stroke with another width.
    pub fn with_width(&self, width: f32) -> Self {
        Self {
            color: self.color,
            width,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
        }
    }
}

/// Apply stroke attributes to an SVG element.
///
/// # Examples
///
/// ```
/// use fretboard_core::draw::StrokeDefinition;
/// use fretboard_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0);
/// let line = svg_element::Line::new()
///     .set("x1", 0)
///     .set("y1", 0)
///     .set("x2", 100)
///     .set("y2", 0);
///
/// let line = fretboard_core::apply_stroke!(line, &stroke);
/// assert!(line.to_string().contains("stroke-width=\"2\""));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        $element
            .set("stroke", $stroke.color().to_hex())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", "butt")
    }};
}
