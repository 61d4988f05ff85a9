//! Configuration types for chord diagram rendering.
//!
//! This module provides the structures that control how a diagram is laid
//! out and styled. All types implement [`serde::Deserialize`] so they can be
//! loaded from TOML configuration files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and theme settings.
//! - [`LayoutConfig`] - Canvas size and grid spacing constants.
//! - [`Theme`] - A complete set of colors and fonts used by the renderer.
//! - [`ThemeOverride`] - A partial theme merged over [`Theme::default`].
//!
//! # Example
//!
//! ```
//! # use fretboard::config::{AppConfig, Theme};
//! let config = AppConfig::default();
//! let theme = Theme::default().merged(config.theme());
//! assert_eq!(theme.fonts.heading.size(), 40);
//! assert_eq!(config.layout().width(), 200);
//! ```

use serde::Deserialize;

use fretboard_core::color::Color;

/// Top-level application configuration combining layout and theme settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Theme override section.
    #[serde(default)]
    theme: ThemeOverride,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and theme.
    ///
    /// # Arguments
    ///
    /// * `layout` - Canvas and grid constants.
    /// * `theme` - Colors and fonts overriding the default theme.
    pub fn new(layout: LayoutConfig, theme: ThemeOverride) -> Self {
        Self { layout, theme }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the theme override.
    pub fn theme(&self) -> &ThemeOverride {
        &self.theme
    }

    /// Returns a copy of this configuration with `theme` layered on top of
    /// the configured theme.
    pub fn with_theme_override(&self, theme: &ThemeOverride) -> Self {
        Self {
            layout: self.layout.clone(),
            theme: self.theme.layered(theme),
        }
    }
}

/// Canvas dimensions and grid constants, in pixels.
///
/// Every field is optional in configuration files; missing fields keep their
/// defaults. The defaults draw a 200×250 canvas with six strings and five
/// fret rows spaced 30 px apart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    width: u32,
    height: u32,
    padding: f32,
    /// Number of horizontal lines, including the top line.
    fret_count: u32,
    fret_spacing: f32,
    string_spacing: f32,
    dot_radius: f32,
    grid_line_width: f32,
    nut_line_width: f32,
    /// Horizontal offset of open and muted markers, left of the string.
    marker_offset: f32,
    /// Gap between the last string and the fret label.
    fret_label_gap: f32,
}

impl LayoutConfig {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn fret_count(&self) -> u32 {
        self.fret_count
    }

    pub fn fret_spacing(&self) -> f32 {
        self.fret_spacing
    }

    pub fn string_spacing(&self) -> f32 {
        self.string_spacing
    }

    pub fn dot_radius(&self) -> f32 {
        self.dot_radius
    }

    pub fn grid_line_width(&self) -> f32 {
        self.grid_line_width
    }

    pub fn nut_line_width(&self) -> f32 {
        self.nut_line_width
    }

    pub fn marker_offset(&self) -> f32 {
        self.marker_offset
    }

    pub fn fret_label_gap(&self) -> f32 {
        self.fret_label_gap
    }

    /// Returns a copy with a different canvas size.
    pub fn with_canvas_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Returns a copy drawing `fret_count` horizontal lines.
    pub fn with_fret_count(mut self, fret_count: u32) -> Self {
        self.fret_count = fret_count;
        self
    }

    /// Checks that the constants describe a drawable grid.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "canvas must not be empty, got {}x{}",
                self.width, self.height
            ));
        }
        if self.fret_count < 2 {
            return Err(format!(
                "fret_count must be at least 2, got {}",
                self.fret_count
            ));
        }
        let lengths = [
            ("padding", self.padding),
            ("fret_spacing", self.fret_spacing),
            ("string_spacing", self.string_spacing),
            ("dot_radius", self.dot_radius),
            ("grid_line_width", self.grid_line_width),
            ("nut_line_width", self.nut_line_width),
        ];
        if let Some((name, value)) = lengths
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(format!("{name} must be a non-negative number, got {value}"));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 250,
            padding: 20.0,
            fret_count: 6,
            fret_spacing: 30.0,
            string_spacing: 30.0,
            dot_radius: 10.0,
            grid_line_width: 2.0,
            nut_line_width: 6.0,
            marker_offset: 7.0,
            fret_label_gap: 10.0,
        }
    }
}

/// A font family (or font file path) and a pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    family: String,
    size: u16,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: u16) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size(&self) -> u16 {
        self.size
    }
}

/// Colors of every diagram element.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub background: Color,
    pub fretboard_lines: Color,
    pub fret_label: Color,
    pub heading_text: Color,
    pub open_mute_text: Color,
    pub fingering_dots: Color,
    pub finger_number_text: Color,
    pub barre_rectangle: Color,
}

/// Fonts for the chord name heading and the smaller labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeFonts {
    pub heading: FontSpec,
    pub small: FontSpec,
}

/// A complete theme. Every key has a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub colors: ThemeColors,
    pub fonts: ThemeFonts,
}

impl Theme {
    /// Merges `theme` over this theme, category by category.
    ///
    /// Each key set in the override replaces the corresponding key; every
    /// other key keeps its current value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fretboard::config::{Theme, ThemeOverride};
    /// # use fretboard_core::color::Color;
    /// let theme = Theme::default().merged(&ThemeOverride::dark());
    /// assert_eq!(theme.colors.background, Color::new("#222222").unwrap());
    /// // The dark preset leaves the small font alone.
    /// assert_eq!(theme.fonts.small, Theme::default().fonts.small);
    /// ```
    pub fn merged(&self, theme: &ThemeOverride) -> Self {
        Self {
            colors: merge_colors(&self.colors, &theme.colors),
            fonts: merge_fonts(&self.fonts, &theme.fonts),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: ThemeColors {
                background: css("white"),
                fretboard_lines: css("black"),
                fret_label: css("black"),
                heading_text: css("black"),
                open_mute_text: css("black"),
                fingering_dots: css("black"),
                finger_number_text: css("white"),
                barre_rectangle: css("darkgray"),
            },
            fonts: ThemeFonts {
                heading: FontSpec::new("Arial", 40),
                small: FontSpec::new("Arial", 20),
            },
        }
    }
}

/// Color keys of a [`ThemeOverride`]. Unset keys keep the base color.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorsOverride {
    pub background: Option<Color>,
    pub fretboard_lines: Option<Color>,
    pub fret_label: Option<Color>,
    pub heading_text: Option<Color>,
    pub open_mute_text: Option<Color>,
    pub fingering_dots: Option<Color>,
    pub finger_number_text: Option<Color>,
    pub barre_rectangle: Option<Color>,
}

/// Font keys of a [`ThemeOverride`]. Unset keys keep the base font.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontsOverride {
    pub heading_font_name: Option<String>,
    pub heading_font_size: Option<u16>,
    pub small_font_name: Option<String>,
    pub small_font_size: Option<u16>,
}

/// A partial theme.
///
/// Deserialized from the `[theme.colors]` and `[theme.fonts]` tables of a
/// configuration file. Color strings are parsed during deserialization, so a
/// value of this type always holds valid colors and merging cannot fail.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeOverride {
    pub colors: ColorsOverride,
    pub fonts: FontsOverride,
}

impl ThemeOverride {
    /// Light-on-dark preset.
    pub fn dark() -> Self {
        let light = css("#cccccc");
        let dark = css("#222222");
        Self {
            colors: ColorsOverride {
                background: Some(dark),
                fretboard_lines: Some(light),
                fret_label: Some(light),
                heading_text: Some(light),
                open_mute_text: Some(light),
                fingering_dots: Some(light),
                finger_number_text: Some(dark),
                barre_rectangle: Some(css("#444444")),
            },
            fonts: FontsOverride {
                heading_font_name: Some("Times New Roman".to_string()),
                heading_font_size: Some(45),
                ..FontsOverride::default()
            },
        }
    }

    /// Returns an override where every key set in `top` wins over this one.
    pub fn layered(&self, top: &ThemeOverride) -> Self {
        let colors = &top.colors;
        let fonts = &top.fonts;
        Self {
            colors: ColorsOverride {
                background: colors.background.or(self.colors.background),
                fretboard_lines: colors.fretboard_lines.or(self.colors.fretboard_lines),
                fret_label: colors.fret_label.or(self.colors.fret_label),
                heading_text: colors.heading_text.or(self.colors.heading_text),
                open_mute_text: colors.open_mute_text.or(self.colors.open_mute_text),
                fingering_dots: colors.fingering_dots.or(self.colors.fingering_dots),
                finger_number_text: colors
                    .finger_number_text
                    .or(self.colors.finger_number_text),
                barre_rectangle: colors.barre_rectangle.or(self.colors.barre_rectangle),
            },
            fonts: FontsOverride {
                heading_font_name: fonts
                    .heading_font_name
                    .clone()
                    .or_else(|| self.fonts.heading_font_name.clone()),
                heading_font_size: fonts.heading_font_size.or(self.fonts.heading_font_size),
                small_font_name: fonts
                    .small_font_name
                    .clone()
                    .or_else(|| self.fonts.small_font_name.clone()),
                small_font_size: fonts.small_font_size.or(self.fonts.small_font_size),
            },
        }
    }
}

fn merge_colors(base: &ThemeColors, colors: &ColorsOverride) -> ThemeColors {
    ThemeColors {
        background: colors.background.unwrap_or(base.background),
        fretboard_lines: colors.fretboard_lines.unwrap_or(base.fretboard_lines),
        fret_label: colors.fret_label.unwrap_or(base.fret_label),
        heading_text: colors.heading_text.unwrap_or(base.heading_text),
        open_mute_text: colors.open_mute_text.unwrap_or(base.open_mute_text),
        fingering_dots: colors.fingering_dots.unwrap_or(base.fingering_dots),
        finger_number_text: colors.finger_number_text.unwrap_or(base.finger_number_text),
        barre_rectangle: colors.barre_rectangle.unwrap_or(base.barre_rectangle),
    }
}

fn merge_fonts(base: &ThemeFonts, fonts: &FontsOverride) -> ThemeFonts {
    ThemeFonts {
        heading: merge_font(
            &base.heading,
            fonts.heading_font_name.as_deref(),
            fonts.heading_font_size,
        ),
        small: merge_font(
            &base.small,
            fonts.small_font_name.as_deref(),
            fonts.small_font_size,
        ),
    }
}

fn merge_font(base: &FontSpec, family: Option<&str>, size: Option<u16>) -> FontSpec {
    FontSpec {
        family: family.map_or_else(|| base.family.clone(), str::to_string),
        size: size.unwrap_or(base.size),
    }
}

/// Parses a color literal of the built-in themes.
///
/// # Panics
///
/// Panics if `color` is not a CSS color the `color` crate knows.
fn css(color: &str) -> Color {
    Color::new(color).unwrap_or_else(|err| panic!("built-in theme color: {err}"))
}
