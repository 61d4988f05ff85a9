//! Text measurement, font resolution and text rendering.
//!
//! Text is shaped with cosmic-text so the layout can use real glyph metrics:
//! ascent and descent of the font, and the ink bounding box of the shaped
//! string. Fonts are requested by family name or by font file path and are
//! resolved once against the system font database; anything unavailable is
//! replaced by a fallback family so rendering never fails on a missing font.
//!
//! # Overview
//!
//! - [`ResolvedFont`] - A requested font mapped onto an installed family
//! - [`TextDefinition`] - Font, size and color shared by several texts
//! - [`Text`] - A renderable string with an anchor
//! - [`TextMetrics`] - Measured extents of a string

use std::{
    collections::HashMap,
    fmt, fs,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache, fontdb};
use log::{debug, info, warn};
use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::Point,
};

const LINE_HEIGHT_FACTOR: f32 = 1.2;
const FONT_FILE_EXTENSIONS: [&str; 4] = ["ttf", "otf", "ttc", "otc"];

/// A font request resolved against the font database.
///
/// `family` is the installed family to use. It is `None` only when no font
/// at all is available, in which case text is measured with estimated
/// metrics.
#[derive(Clone, PartialEq)]
pub struct ResolvedFont {
    family: Option<String>,
    data: Option<Arc<Vec<u8>>>,
    fallback: bool,
}

impl ResolvedFont {
    /// Resolves a family name or font file path.
    ///
    /// Names ending in a font file extension are loaded from disk when the
    /// file exists; otherwise the file stem is tried as a family name.
    /// Unknown families resolve to a fallback family and log a warning.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fretboard_core::draw::ResolvedFont;
    /// let font = ResolvedFont::resolve("Surely Not An Installed Family");
    /// assert!(font.is_fallback());
    /// ```
    pub fn resolve(name: &str) -> Self {
        text_manager().resolve_font(name)
    }

    /// A font without any family, measured with estimated metrics.
    pub fn unavailable() -> Self {
        Self {
            family: None,
            data: None,
            fallback: true,
        }
    }

    /// The installed family name, if any font is available.
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// Raw font file contents for fonts loaded from a path.
    ///
    /// Rasterizers need these to see the same faces as the measurement.
    pub fn font_data(&self) -> Option<&Arc<Vec<u8>>> {
        self.data.as_ref()
    }

    /// Returns true when the requested font was substituted.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

impl fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("family", &self.family)
            .field("data_len", &self.data.as_ref().map(|data| data.len()))
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// Font, size and color of a group of texts.
///
/// # Examples
///
/// ```
/// # use fretboard_core::draw::{ResolvedFont, TextDefinition};
/// # use fretboard_core::color::Color;
/// let small = TextDefinition::new(ResolvedFont::resolve("Arial"), 20);
/// let label = small.with_color(Color::new("white").unwrap());
/// assert_eq!(label.font_size(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font: ResolvedFont,
    font_size: u16,
    color: Color,
}

impl TextDefinition {
    /// Creates a black text definition. `font_size` is in pixels.
    pub fn new(font: ResolvedFont, font_size: u16) -> Self {
        Self {
            font,
            font_size: font_size.max(1),
            color: Color::default(),
        }
    }

    /// Returns a copy of this definition drawn in `color`.
    pub fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }

    pub fn font(&self) -> &ResolvedFont {
        &self.font
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Which point of the text its render position refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Horizontal center of the advance, on the baseline.
    #[default]
    MiddleBaseline,
    /// Left edge, at the top of the ascent.
    TopLeft,
}

/// Measured extents of a shaped string, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    width: f32,
    ascent: f32,
    descent: f32,
    ink_bottom: f32,
}

impl TextMetrics {
    /// Creates metrics from known values.
    ///
    /// `ink_bottom` is the lowest inked pixel of the string measured from the
    /// top of the font ascent.
    pub fn new(width: f32, ascent: f32, descent: f32, ink_bottom: f32) -> Self {
        Self {
            width,
            ascent,
            descent,
            ink_bottom,
        }
    }

    /// Proportional metrics used when no font is available.
    pub fn estimate(content: &str, font_size: f32) -> Self {
        let ascent = font_size * 0.8;
        let ink_bottom = if content.is_empty() { 0.0 } else { ascent };
        Self {
            width: content.chars().count() as f32 * font_size * 0.55,
            ascent,
            descent: font_size * 0.2,
            ink_bottom,
        }
    }

    /// Advance width of the string
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Distance from the top of the font to the baseline
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Distance from the baseline to the bottom of the font, positive
    pub fn descent(&self) -> f32 {
        self.descent
    }

    /// Height of the glyph box: bottom of the ink measured from the top of the ascent
    pub fn ink_bottom(&self) -> f32 {
        self.ink_bottom
    }
}

/// A renderable string.
///
/// Rendered on the [`RenderLayer::Text`] layer as an SVG `<text>` element.
///
/// # Examples
///
/// ```
/// # use fretboard_core::draw::{ResolvedFont, Text, TextAnchor, TextDefinition};
/// let definition = TextDefinition::new(ResolvedFont::resolve("Arial"), 40);
/// let title = Text::new(&definition, "Am7").with_anchor(TextAnchor::MiddleBaseline);
///
/// let metrics = title.metrics();
/// assert!(metrics.width() > 0.0);
/// assert!(metrics.ink_bottom() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
    anchor: TextAnchor,
    role: Option<&'static str>,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
            anchor: TextAnchor::default(),
            role: None,
        }
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Tags the rendered element with a `data-role` attribute.
    pub fn with_role(mut self, role: &'static str) -> Self {
        self.role = Some(role);
        self
    }

    /// Measures the text with its font.
    pub fn metrics(&self) -> TextMetrics {
        text_manager().measure(self.content, self.definition)
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let (baseline, text_anchor) = match self.anchor {
            TextAnchor::MiddleBaseline => (position.y(), "middle"),
            TextAnchor::TopLeft => (position.y() + self.metrics().ascent(), "start"),
        };

        let color = self.definition.color();
        let mut rendered = svg_element::Text::new(self.content)
            .set("x", position.x())
            .set("y", baseline)
            .set("text-anchor", text_anchor)
            .set("font-size", self.definition.font_size())
            .set("fill", &color)
            .set("fill-opacity", color.alpha());

        if let Some(family) = self.definition.font().family() {
            rendered = rendered.set("font-family", format!("'{family}'"));
        }
        if let Some(role) = self.role {
            rendered = rendered.set("data-role", role);
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(rendered));
        output
    }
}

struct FontState {
    font_system: FontSystem,
    swash_cache: SwashCache,
    resolved: HashMap<String, ResolvedFont>,
}

/// Owns the font database and glyph cache shared by all measurements.
///
/// Creating a `FontSystem` scans the system fonts, so a single instance is
/// kept for the whole process.
struct TextManager {
    state: Mutex<FontState>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            state: Mutex::new(FontState {
                font_system: FontSystem::new(),
                swash_cache: SwashCache::new(),
                resolved: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FontState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve_font(&self, name: &str) -> ResolvedFont {
        let mut state = self.lock();
        if let Some(font) = state.resolved.get(name) {
            return font.clone();
        }

        let font = resolve_uncached(&mut state.font_system, name);
        debug!(requested = name, font:?; "Font resolved");
        state.resolved.insert(name.to_string(), font.clone());
        font
    }

    /// Shapes `content` and measures its metrics and ink extent.
    fn measure(&self, content: &str, definition: &TextDefinition) -> TextMetrics {
        let font_size = f32::from(definition.font_size());
        let Some(family) = definition.font().family() else {
            return TextMetrics::estimate(content, font_size);
        };
        if content.is_empty() {
            return TextMetrics::estimate(content, font_size);
        }

        let mut state = self.lock();
        let FontState {
            font_system,
            swash_cache,
            ..
        } = &mut *state;

        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT_FACTOR);
        let mut buffer = Buffer::new(font_system, metrics);
        {
            let mut buffer = buffer.borrow_with(font_system);
            let attrs = Attrs::new().family(Family::Name(family));
            buffer.set_size(None, None);
            buffer.set_text(content, &attrs, Shaping::Advanced, None);
            buffer.shape_until_scroll(true);
        }

        let estimate = TextMetrics::estimate(content, font_size);
        let (ascent, descent) = buffer
            .line_layout(font_system, 0)
            .and_then(|lines| lines.first())
            .map(|line| (line.max_ascent, line.max_descent))
            .filter(|(ascent, _)| *ascent > 0.0)
            .unwrap_or((estimate.ascent(), estimate.descent()));

        let mut width: f32 = 0.0;
        let mut ascent_top = None;
        let mut glyphs = Vec::new();
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            ascent_top.get_or_insert(run.line_y - ascent);
            glyphs.extend(
                run.glyphs
                    .iter()
                    .map(|glyph| glyph.physical((0.0, run.line_y), 1.0)),
            );
        }

        if glyphs.is_empty() {
            return estimate;
        }

        let ascent_top = ascent_top.unwrap_or_default();
        let mut ink_bottom: Option<f32> = None;
        for glyph in glyphs {
            if let Some(image) = swash_cache.get_image(font_system, glyph.cache_key) {
                if image.placement.width == 0 || image.placement.height == 0 {
                    continue;
                }
                let top = glyph.y as f32 - image.placement.top as f32;
                let bottom = top + image.placement.height as f32 - ascent_top;
                ink_bottom = Some(ink_bottom.map_or(bottom, |current| current.max(bottom)));
            }
        }

        TextMetrics::new(width, ascent, descent, ink_bottom.unwrap_or(ascent))
    }
}

fn text_manager() -> &'static TextManager {
    TEXT_MANAGER.get_or_init(TextManager::new)
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

fn is_font_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FONT_FILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn resolve_uncached(font_system: &mut FontSystem, name: &str) -> ResolvedFont {
    let mut family_name = name;

    if is_font_file(name) {
        match fs::read(name) {
            Ok(data) => {
                let data = Arc::new(data);
                let ids = font_system
                    .db_mut()
                    .load_font_source(fontdb::Source::Binary(data.clone()));
                let family = ids
                    .first()
                    .and_then(|id| font_system.db().face(*id))
                    .and_then(|face| face.families.first())
                    .map(|(family, _)| family.clone());
                if let Some(family) = family {
                    info!(path = name, family; "Loaded font file");
                    return ResolvedFont {
                        family: Some(family),
                        data: Some(data),
                        fallback: false,
                    };
                }
                warn!(path = name; "Font file contains no usable face");
            }
            Err(err) => {
                debug!(path = name, err:err; "Font file not readable, trying its name as a family");
            }
        }
        family_name = Path::new(name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(name);
    }

    if let Some(family) = find_family(font_system.db(), family_name) {
        return ResolvedFont {
            family: Some(family),
            data: None,
            fallback: false,
        };
    }

    let fallback = fallback_family(font_system.db());
    warn!(requested = name, fallback:?; "Font not available, using fallback");
    ResolvedFont {
        family: fallback,
        data: None,
        fallback: true,
    }
}

/// Finds the installed spelling of a family, ignoring ASCII case.
fn find_family(db: &fontdb::Database, name: &str) -> Option<String> {
    db.faces()
        .flat_map(|face| face.families.iter())
        .map(|(family, _)| family)
        .find(|family| family.eq_ignore_ascii_case(name))
        .cloned()
}

/// Families tried in order before searching the database for a sans face.
const FALLBACK_FAMILIES: [&str; 6] = [
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Helvetica",
    "Arial",
    "FreeSans",
];

/// The fontdb sans-serif family if installed, then a well-known sans family,
/// then any sans face, then any face.
fn fallback_family(db: &fontdb::Database) -> Option<String> {
    let sans_serif = db.family_name(&fontdb::Family::SansSerif);
    find_family(db, sans_serif)
        .or_else(|| {
            FALLBACK_FAMILIES
                .iter()
                .find_map(|name| find_family(db, name))
        })
        .or_else(|| {
            pick_fallback(db.faces().filter_map(|face| {
                face.families
                    .first()
                    .map(|(family, _)| (family.as_str(), face.monospaced))
            }))
        })
}

/// Picks a fallback from `(family, monospaced)` faces.
///
/// A proportional family named "Sans" wins over other proportional
/// families, which win over monospaced ones. Math and symbol families are
/// only taken when nothing else is installed.
fn pick_fallback<'a>(faces: impl Iterator<Item = (&'a str, bool)>) -> Option<String> {
    faces
        .map(|(family, monospaced)| {
            let lower = family.to_ascii_lowercase();
            let special = ["math", "symbol", "emoji", "mono"]
                .iter()
                .any(|word| lower.contains(word));
            let rank = match (special || monospaced, lower.contains("sans")) {
                (false, true) => 0,
                (false, false) => 1,
                (true, _) => 2,
            };
            (rank, family)
        })
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, family)| family.to_string())
}
