//! Composition of a chord diagram into a layered SVG scene.
//!
//! Every element is emitted onto its [`RenderLayer`], so the final stacking
//! is fixed by the layers and not by emission order: barre blocks always sit
//! below finger dots, and finger numbers above them.

use std::sync::Arc;

use log::{debug, trace};
use svg::{Document, node::element as svg_element};

use fretboard_core::{
    chord::Chord,
    draw::{
        BarreBlock, Dot, Drawable, GridLine, LayeredOutput, LineKind, Orientation, RenderLayer,
        ResolvedFont, StrokeDefinition, Text, TextAnchor, TextDefinition,
    },
    fingering::FingerPosition,
    geometry::Point,
};

use crate::{config::Theme, layout::DiagramLayout};

/// Text definitions for each kind of text in the diagram.
#[derive(Debug, Clone)]
pub struct TextStyles {
    heading: TextDefinition,
    fret_label: TextDefinition,
    marker: TextDefinition,
    finger_number: TextDefinition,
}

impl TextStyles {
    /// Resolves the theme fonts and pairs them with the theme colors.
    pub fn new(theme: &Theme) -> Self {
        let heading_font = ResolvedFont::resolve(theme.fonts.heading.family());
        let small_font = ResolvedFont::resolve(theme.fonts.small.family());
        Self::with_fonts(theme, heading_font, small_font)
    }

    /// Builds the styles from already resolved fonts.
    pub fn with_fonts(theme: &Theme, heading_font: ResolvedFont, small_font: ResolvedFont) -> Self {
        let colors = &theme.colors;
        let small = TextDefinition::new(small_font, theme.fonts.small.size());
        Self {
            heading: TextDefinition::new(heading_font, theme.fonts.heading.size())
                .with_color(colors.heading_text),
            fret_label: small.with_color(colors.fret_label),
            marker: small.with_color(colors.open_mute_text),
            finger_number: small.with_color(colors.finger_number_text),
        }
    }

    pub fn heading(&self) -> &TextDefinition {
        &self.heading
    }

    /// Contents of the font files loaded from disk, without duplicates.
    pub fn font_data(&self) -> Vec<Arc<Vec<u8>>> {
        let mut data: Vec<Arc<Vec<u8>>> = Vec::new();
        for font in [self.heading.font(), self.fret_label.font()] {
            if let Some(bytes) = font.font_data() {
                if !data.iter().any(|known| Arc::ptr_eq(known, bytes)) {
                    data.push(Arc::clone(bytes));
                }
            }
        }
        data
    }

    /// Family used for text that names no family of its own.
    pub fn default_family(&self) -> Option<&str> {
        self.fret_label.font().family()
    }
}

/// A chord diagram ready to be composed.
#[derive(Debug)]
pub struct Scene<'a> {
    chord: &'a Chord,
    theme: &'a Theme,
    styles: &'a TextStyles,
    layout: &'a DiagramLayout,
}

impl<'a> Scene<'a> {
    pub fn new(
        chord: &'a Chord,
        theme: &'a Theme,
        styles: &'a TextStyles,
        layout: &'a DiagramLayout,
    ) -> Self {
        Self {
            chord,
            theme,
            styles,
            layout,
        }
    }

    /// Collects every element of the diagram, per layer.
    pub fn layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        output.merge(self.background());
        output.merge(self.title());
        output.merge(self.grid());
        if !self.chord.shows_nut() {
            output.merge(self.fret_label());
        }
        output.merge(self.barres());
        output.merge(self.markers());

        trace!(
            grid = output.count(RenderLayer::Grid),
            barres = output.count(RenderLayer::Barre),
            dots = output.count(RenderLayer::Marker),
            texts = output.count(RenderLayer::Text);
            "Scene composed"
        );
        output
    }

    /// Composes the diagram into an SVG document the size of the canvas.
    pub fn compose(&self) -> Document {
        let size = self.layout.canvas_size();
        let mut document = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", size.width(), size.height()),
            )
            .set("width", size.width())
            .set("height", size.height());

        for node in self.layers().render() {
            document = document.add(node);
        }
        document
    }

    fn background(&self) -> LayeredOutput {
        let size = self.layout.canvas_size();
        let color = &self.theme.colors.background;
        let rect = svg_element::Rectangle::new()
            .set("data-role", "background")
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width())
            .set("height", size.height())
            .set("fill", color)
            .set("fill-opacity", color.alpha());

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Background, Box::new(rect));
        output
    }

    fn title(&self) -> LayeredOutput {
        if self.chord.name().is_empty() {
            return LayeredOutput::new();
        }
        Text::new(&self.styles.heading, self.chord.name())
            .with_anchor(TextAnchor::MiddleBaseline)
            .with_role("title")
            .render_to_layers(self.layout.title_position())
    }

    fn grid(&self) -> LayeredOutput {
        let config = self.layout.config();
        let origin = self.layout.origin();
        let stroke =
            StrokeDefinition::solid(self.theme.colors.fretboard_lines, config.grid_line_width());
        let mut output = LayeredOutput::new();

        let string_line = GridLine::new(
            LineKind::String,
            Orientation::Vertical,
            self.layout.string_length(),
            stroke.clone(),
        );
        for (index, _) in self.chord.fingering().iter() {
            let start = origin.with_x(self.layout.string_x(index));
            output.merge(string_line.render_to_layers(start));
        }

        let fret_line = GridLine::new(
            LineKind::Fret,
            Orientation::Horizontal,
            self.layout.grid_width(),
            stroke.clone(),
        );
        for index in 0..config.fret_count() {
            let start = origin.with_y(self.layout.fret_line_y(index));
            if index == 0 && self.chord.shows_nut() {
                let nut = GridLine::new(
                    LineKind::Nut,
                    Orientation::Horizontal,
                    self.layout.grid_width(),
                    stroke.with_width(config.nut_line_width()),
                );
                output.merge(nut.render_to_layers(start));
            } else {
                output.merge(fret_line.render_to_layers(start));
            }
        }

        output
    }

    fn fret_label(&self) -> LayeredOutput {
        let label = self.chord.start_fret().to_string();
        let text = Text::new(&self.styles.fret_label, &label)
            .with_anchor(TextAnchor::TopLeft)
            .with_role("fret-label");
        let position = self
            .layout
            .fret_label_position(text.metrics().ink_bottom());
        debug!(label, x = position.x(), y = position.y(); "Fret label placed");
        text.render_to_layers(position)
    }

    fn barres(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for barre in self.chord.barres() {
            let display_fret = self.chord.display_fret(barre.fret());
            let Some(row) = self.layout.visible_row(display_fret) else {
                debug!(fret = barre.fret(), finger = barre.finger(), display_fret; "Barre outside visible frets, skipped");
                continue;
            };

            let bounds = self.layout.barre_bounds(barre.span(), row);
            let block = BarreBlock::new(bounds.to_size(), self.theme.colors.barre_rectangle);
            debug!(
                fret = barre.fret(),
                finger = barre.finger(),
                strings:? = barre.strings(),
                row;
                "Barre placed"
            );
            output.merge(block.render_to_layers(bounds.center()));
        }
        output
    }

    fn markers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for (string, position) in self.chord.fingering().iter() {
            match position {
                FingerPosition::Muted => output.merge(self.marker_text(string, "X")),
                FingerPosition::Open => output.merge(self.marker_text(string, "O")),
                FingerPosition::Fretted { fret, finger } => {
                    let display_fret = self.chord.display_fret(fret);
                    match self.layout.visible_row(display_fret) {
                        Some(row) => output.merge(self.finger_dot(string, row, finger)),
                        None => {
                            debug!(string, fret, display_fret; "Fretted note outside visible frets, skipped");
                        }
                    }
                }
            }
        }
        output
    }

    fn marker_text(&self, string: usize, letter: &str) -> LayeredOutput {
        Text::new(&self.styles.marker, letter)
            .with_anchor(TextAnchor::TopLeft)
            .with_role("marker")
            .render_to_layers(self.layout.marker_position(string))
    }

    fn finger_dot(&self, string: usize, row: u32, finger: u8) -> LayeredOutput {
        let center = self.layout.dot_center(string, row);
        let dot = Dot::new(
            self.layout.config().dot_radius(),
            self.theme.colors.fingering_dots,
        );
        let mut output = dot.render_to_layers(center);

        if finger > 0 {
            let digit = finger.to_string();
            let text = Text::new(&self.styles.finger_number, &digit)
                .with_anchor(TextAnchor::MiddleBaseline)
                .with_role("finger-number");
            let metrics = text.metrics();
            let position: Point = self.layout.finger_number_position(
                center,
                metrics.ascent(),
                metrics.descent(),
            );
            output.merge(text.render_to_layers(position));
        }
        output
    }
}
