//! Fretboard - guitar chord diagrams rendered to PNG.
//!
//! Takes a chord name, one finger position per string and a starting fret,
//! and draws the classic chord box: strings and frets, open and muted
//! markers, finger dots with finger numbers, and barres.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), fretboard::FretboardError> {
//! use fretboard::fingering::FingeringSpec;
//!
//! let fingering: FingeringSpec = "x 3:3 2:2 o 1:1 o".parse()?;
//! let receipt = fretboard::render("C", fingering, "c_major.png", 1, None)?;
//! assert_eq!(receipt.chord_name(), "C");
//! # Ok(())
//! # }
//! ```

pub mod config;

mod diagram;
mod error;
mod export;
mod layout;

pub use fretboard_core::{barre, chord, color, fingering};

pub use diagram::Diagram;
pub use error::FretboardError;
pub use layout::DiagramLayout;

use std::path::{Path, PathBuf};

use log::{debug, info};

use fretboard_core::draw::Text;

use chord::Chord;
use config::{AppConfig, Theme, ThemeOverride};
use export::scene::{Scene, TextStyles};
use fingering::FingeringSpec;

/// Confirmation that a diagram was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReceipt {
    chord_name: String,
    output_path: PathBuf,
}

impl RenderReceipt {
    pub fn chord_name(&self) -> &str {
        &self.chord_name
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

/// Builder for rendering chord diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use fretboard::{ChordDiagramBuilder, chord::Chord, config::AppConfig};
///
/// # fn main() -> Result<(), fretboard::FretboardError> {
/// let builder = ChordDiagramBuilder::new(AppConfig::default());
/// let chord = Chord::new("Am", "x o 2:2 2:3 1:1 o".parse()?);
///
/// // Render in memory
/// let diagram = builder.render(&chord)?;
/// assert_eq!((diagram.width(), diagram.height()), (200, 250));
///
/// // Or render straight to a file
/// builder.render_to_file(&chord, "a_minor.png")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChordDiagramBuilder {
    config: AppConfig,
}

impl ChordDiagramBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Layout constants and theme overrides
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render a chord into a bitmap.
    ///
    /// The theme is merged over the default theme, the heading is measured
    /// to size the title area, and the composed scene is rasterized.
    ///
    /// # Errors
    ///
    /// Returns [`FretboardError::Config`] for an invalid layout and
    /// [`FretboardError::Raster`] if rasterization fails.
    pub fn render(&self, chord: &Chord) -> Result<Diagram, FretboardError> {
        info!(chord = chord.name(), start_fret = chord.start_fret(); "Rendering chord diagram");

        let layout_config = self.config.layout();
        layout_config.validate().map_err(FretboardError::Config)?;

        let theme = Theme::default().merged(self.config.theme());
        let styles = TextStyles::new(&theme);

        let heading = Text::new(styles.heading(), chord.name()).metrics();
        let layout = DiagramLayout::new(layout_config, heading.ink_bottom());
        debug!(
            title_area_height = layout.title_area_height(),
            origin:? = layout.origin(),
            barres = chord.barres().len();
            "Layout derived"
        );

        let document = Scene::new(chord, &theme, &styles, &layout).compose();
        let pixmap = export::raster::rasterize(
            &document,
            layout_config.width(),
            layout_config.height(),
            &styles.font_data(),
            styles.default_family(),
        )?;

        Ok(Diagram::new(pixmap, layout))
    }

    /// Render a chord and write it as a PNG file.
    ///
    /// # Errors
    ///
    /// Returns [`FretboardError::Io`] carrying the original error if the
    /// file cannot be written, plus any error of [`Self::render`].
    pub fn render_to_file(
        &self,
        chord: &Chord,
        output: impl AsRef<Path>,
    ) -> Result<RenderReceipt, FretboardError> {
        let output = output.as_ref();
        let diagram = self.render(chord)?;
        diagram.save(output)?;

        info!(chord = chord.name(), path:? = output; "Chord diagram saved");
        Ok(RenderReceipt {
            chord_name: chord.name().to_string(),
            output_path: output.to_path_buf(),
        })
    }
}

/// Render one chord diagram to `output` with the default layout.
///
/// `theme` is merged over the default theme key by key.
///
/// # Errors
///
/// Returns [`FretboardError::Fingering`] if `start_fret` is 0 and
/// [`FretboardError::Io`] if the file cannot be written.
pub fn render(
    chord_name: &str,
    fingering: FingeringSpec,
    output: impl AsRef<Path>,
    start_fret: u32,
    theme: Option<&ThemeOverride>,
) -> Result<RenderReceipt, FretboardError> {
    let chord = Chord::new(chord_name, fingering).with_start_fret(start_fret)?;
    let config = AppConfig::new(Default::default(), theme.cloned().unwrap_or_default());
    ChordDiagramBuilder::new(config).render_to_file(&chord, output)
}
