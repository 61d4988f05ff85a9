//! CLI logic for the Fretboard chord diagram tool.
//!
//! This module contains the core CLI logic: configuration discovery, chord
//! selection from files and flags, and writing the PNG.

pub mod error_adapter;

mod args;
mod chord_file;
mod config;
mod error;

pub use args::{Args, ThemePreset};
pub use chord_file::{load_chord_file, resolve_chord};
pub use config::ConfigError;
pub use error::CliError;

use log::info;

use fretboard::{ChordDiagramBuilder, RenderReceipt};

/// Run the Fretboard CLI application
///
/// Loads the configuration, applies the `--theme` preset on top of the
/// configured theme, resolves the chord and writes the diagram to the
/// output path.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - Configuration loading errors
/// - Chord file and fingering errors
/// - Layout, rasterization and file I/O errors
pub fn run(args: &Args) -> Result<RenderReceipt, CliError> {
    info!(
        input_path:? = args.input,
        output_path = args.output;
        "Processing chord"
    );

    // Load configuration
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(theme) = args.theme.and_then(ThemePreset::theme_override) {
        app_config = app_config.with_theme_override(&theme);
    }

    let chord = resolve_chord(args)?;

    let builder = ChordDiagramBuilder::new(app_config);
    let receipt = builder.render_to_file(&chord, &args.output)?;

    info!(
        chord = receipt.chord_name(),
        output_file = args.output;
        "PNG exported successfully"
    );

    Ok(receipt)
}
