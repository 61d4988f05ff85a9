//! Error type of the CLI.

use std::{io, path::PathBuf};

use thiserror::Error;

use fretboard::{FretboardError, fingering::FingeringError};

use crate::config::ConfigError;

/// Everything that can stop the CLI from producing a diagram.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Fretboard(#[from] FretboardError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid chord file {}", path.display())]
    ChordFile {
        path: PathBuf,
        src: String,
        #[source]
        err: toml::de::Error,
    },

    #[error("Failed to read {}: {err}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        err: io::Error,
    },

    #[error("Invalid --fingering value: {err}")]
    Fingering { input: String, err: FingeringError },

    #[error("No chord given: pass a chord file or --fingering")]
    MissingInput,
}
