//! Command-line argument definitions for the Fretboard CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the chord (from a chord file, flags, or
//! both), the output path, the configuration file and logging verbosity.

use clap::{Parser, ValueEnum};

use fretboard::config::ThemeOverride;

/// Command-line arguments for the Fretboard chord diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input chord file (TOML)
    #[arg(help = "Path to a chord file; optional when --fingering is given")]
    pub input: Option<String>,

    /// Path to the output PNG file
    #[arg(short, long, default_value = "out.png")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Chord name drawn as the heading, overrides the chord file
    #[arg(short, long)]
    pub name: Option<String>,

    /// Fingering, low string first, e.g. "x 3:3 2:2 o 1:1 o"
    #[arg(short, long)]
    pub fingering: Option<String>,

    /// First fret shown in the diagram, overrides the chord file
    #[arg(short, long)]
    pub start_fret: Option<u32>,

    /// Built-in theme layered over the configured theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemePreset>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Built-in themes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemePreset {
    /// Dark lines on white, the default look
    Light,
    /// Light lines on a dark background
    Dark,
}

impl ThemePreset {
    /// The override this preset applies, if any.
    pub fn theme_override(self) -> Option<ThemeOverride> {
        match self {
            Self::Light => None,
            Self::Dark => Some(ThemeOverride::dark()),
        }
    }
}
