//! Chord selection from chord files and command-line flags.
//!
//! A chord file is a small TOML document:
//!
//! ```toml
//! name = "F (Barre)"
//! start_fret = 1
//! fingering = [[1, 1], [3, 3], [3, 4], [2, 2], [1, 1], [1, 1]]
//! ```
//!
//! Each fingering entry is `"x"`, `"o"`, `[fret, finger]`, a one-element
//! `["x"]`/`["o"]`/`[0]`, or a bare fret number.

use std::{fs, path::Path};

use log::debug;

use fretboard::{FretboardError, chord::Chord, fingering::FingeringSpec};

use crate::{Args, error::CliError};

/// Reads and parses a chord file.
///
/// # Errors
///
/// Returns [`CliError::Read`] if the file cannot be read and
/// [`CliError::ChordFile`] if it is not a valid chord.
pub fn load_chord_file(path: impl AsRef<Path>) -> Result<Chord, CliError> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|err| CliError::Read {
        path: path.to_path_buf(),
        err,
    })?;

    let chord: Chord = toml::from_str(&src).map_err(|err| CliError::ChordFile {
        path: path.to_path_buf(),
        src,
        err,
    })?;

    debug!(path = path.display().to_string(), chord:?; "Chord file loaded");
    Ok(chord)
}

/// Builds the chord to render from the input file and the flags.
///
/// Flags win over values from the file. A fingering must come from one of
/// the two.
///
/// # Errors
///
/// Returns [`CliError::MissingInput`] when neither a file nor `--fingering`
/// is given, [`CliError::Fingering`] for invalid `--fingering` text, and a
/// fingering error for a zero start fret.
pub fn resolve_chord(args: &Args) -> Result<Chord, CliError> {
    let from_file = args
        .input
        .as_ref()
        .map(|path| load_chord_file(path))
        .transpose()?;

    let fingering = match (&args.fingering, &from_file) {
        (Some(text), _) => text
            .parse::<FingeringSpec>()
            .map_err(|err| CliError::Fingering {
                input: text.clone(),
                err,
            })?,
        (None, Some(chord)) => chord.fingering().clone(),
        (None, None) => return Err(CliError::MissingInput),
    };

    let name = args
        .name
        .clone()
        .or_else(|| from_file.as_ref().map(|chord| chord.name().to_string()))
        .unwrap_or_default();
    let start_fret = args
        .start_fret
        .or_else(|| from_file.as_ref().map(Chord::start_fret))
        .unwrap_or(1);

    Chord::new(name, fingering)
        .with_start_fret(start_fret)
        .map_err(|err| FretboardError::from(err).into())
}
