//! Coordinate derivation for a chord diagram.
//!
//! [`DiagramLayout`] turns the [`LayoutConfig`] constants and the measured
//! heading height into the positions of every diagram element. It performs no
//! text shaping itself: text extents are passed in, so every formula here can
//! be checked without fonts.

use std::ops::RangeInclusive;

use fretboard_core::{
    fingering::STRING_COUNT,
    geometry::{Bounds, Point, Size},
};

use crate::config::LayoutConfig;

/// Positions of the diagram elements on the canvas.
///
/// The fretboard origin is the top end of the first string. Strings run
/// downward from the origin, fret lines run rightward, and row `n` is the
/// space between fret line `n - 1` and fret line `n`.
///
/// # Examples
///
/// ```
/// # use fretboard::{DiagramLayout, config::LayoutConfig};
/// // A heading whose ink reaches 29 px below the top of its line.
/// let layout = DiagramLayout::new(&LayoutConfig::default(), 29.0);
/// assert_eq!(layout.title_area_height(), 69.0);
/// assert_eq!(layout.row_center_y(1), 84.0);
/// assert_eq!(layout.visible_row(6), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramLayout {
    config: LayoutConfig,
    title_area_height: f32,
}

impl DiagramLayout {
    /// Derives the layout from the constants and the heading's glyph box
    /// bottom, measured from the top of its line.
    pub fn new(config: &LayoutConfig, heading_ink_bottom: f32) -> Self {
        Self {
            config: config.clone(),
            title_area_height: config.padding() * 2.0 + heading_ink_bottom.max(0.0),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.config.width() as f32, self.config.height() as f32)
    }

    /// Height reserved above the fretboard for the chord name and markers.
    pub fn title_area_height(&self) -> f32 {
        self.title_area_height
    }

    /// Baseline center of the chord name.
    pub fn title_position(&self) -> Point {
        Point::new(
            self.config.width() as f32 / 2.0,
            self.title_area_height / 2.0,
        )
    }

    /// Top end of the first string.
    pub fn origin(&self) -> Point {
        Point::new(self.config.padding(), self.title_area_height)
    }

    /// Horizontal position of string `index`, zero based.
    pub fn string_x(&self, index: usize) -> f32 {
        self.config.padding() + index as f32 * self.config.string_spacing()
    }

    /// Vertical position of fret line `index`; line 0 is the top line.
    pub fn fret_line_y(&self, index: u32) -> f32 {
        self.title_area_height + index as f32 * self.config.fret_spacing()
    }

    /// Length of each string line.
    pub fn string_length(&self) -> f32 {
        self.config.fret_spacing() * self.config.fret_count().saturating_sub(1) as f32
    }

    /// Length of each fret line: from the first to the last string.
    pub fn grid_width(&self) -> f32 {
        self.config.string_spacing() * (STRING_COUNT - 1) as f32
    }

    /// Maps a display fret onto a visible row.
    ///
    /// Rows `1..fret_count` are visible. Anything else returns `None` and is
    /// not drawn.
    pub fn visible_row(&self, display_fret: i64) -> Option<u32> {
        let last_row = i64::from(self.config.fret_count()) - 1;
        if (1..=last_row).contains(&display_fret) {
            u32::try_from(display_fret).ok()
        } else {
            None
        }
    }

    /// Vertical center of row `row`.
    pub fn row_center_y(&self, row: u32) -> f32 {
        self.title_area_height + (row as f32 - 0.5) * self.config.fret_spacing()
    }

    /// Center of the finger dot on `string` in `row`.
    pub fn dot_center(&self, string: usize, row: u32) -> Point {
        Point::new(self.string_x(string), self.row_center_y(row))
    }

    /// Top-left corner of the open or muted marker above `string`.
    pub fn marker_position(&self, string: usize) -> Point {
        Point::new(
            self.string_x(string) - self.config.marker_offset(),
            self.title_area_height - self.config.padding() * 1.2,
        )
    }

    /// Top-left corner of the fret label.
    ///
    /// The label sits right of the grid, its glyph box centered on the
    /// first row.
    pub fn fret_label_position(&self, label_ink_bottom: f32) -> Point {
        Point::new(
            self.config.padding() + self.grid_width() + self.config.fret_label_gap(),
            self.title_area_height + self.config.fret_spacing() / 2.0 - label_ink_bottom / 2.0,
        )
    }

    /// Outer bounds of a barre over `strings` in `row`.
    ///
    /// The block reaches one dot radius past the outer strings and one dot
    /// radius above and below the row center.
    pub fn barre_bounds(&self, strings: RangeInclusive<usize>, row: u32) -> Bounds {
        let radius = self.config.dot_radius();
        let y = self.row_center_y(row);
        Bounds::new_from_corners(
            Point::new(self.string_x(*strings.start()) - radius, y - radius),
            Point::new(self.string_x(*strings.end()) + radius, y + radius),
        )
    }

    /// Baseline center of a finger number drawn on the dot at `center`.
    pub fn finger_number_position(&self, center: Point, ascent: f32, descent: f32) -> Point {
        center.with_y(center.y() + (ascent - descent) / 1.8)
    }
}
