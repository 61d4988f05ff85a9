//! Chord definitions: a name, a fingering and the fret the diagram starts at.

use serde::Deserialize;

use crate::{
    barre::{self, BarreGroup},
    fingering::{FingeringError, FingeringSpec},
};

/// A chord to be drawn as a single fretboard diagram.
///
/// # Examples
///
/// ```
/// # use fretboard_core::chord::Chord;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let chord = Chord::new("B♭", "1:1 1:1 3:3 3:3 3:3 1:1".parse()?).with_start_fret(5)?;
/// assert_eq!(chord.display_fret(6), 2);
/// assert!(!chord.shows_nut());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawChord")]
pub struct Chord {
    name: String,
    fingering: FingeringSpec,
    start_fret: u32,
}

impl Chord {
    /// Creates a chord whose diagram starts at the nut.
    pub fn new(name: impl Into<String>, fingering: FingeringSpec) -> Self {
        Self {
            name: name.into(),
            fingering,
            start_fret: 1,
        }
    }

    /// Sets the first fret shown in the diagram.
    ///
    /// # Errors
    ///
    /// Returns [`FingeringError::ZeroStartFret`] if `start_fret` is 0.
    pub fn with_start_fret(mut self, start_fret: u32) -> Result<Self, FingeringError> {
        if start_fret == 0 {
            return Err(FingeringError::ZeroStartFret);
        }
        self.start_fret = start_fret;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fingering(&self) -> &FingeringSpec {
        &self.fingering
    }

    pub fn start_fret(&self) -> u32 {
        self.start_fret
    }

    /// Returns true when the diagram begins at the nut.
    pub fn shows_nut(&self) -> bool {
        self.start_fret == 1
    }

    /// Translates an absolute fret into the diagram row it lands on.
    ///
    /// Row 1 is the first row below the top line. The result may be zero or
    /// negative for frets above the visible window.
    pub fn display_fret(&self, fret: u32) -> i64 {
        i64::from(fret) - (i64::from(self.start_fret) - 1)
    }

    /// Returns the barres formed by this chord's fingering.
    pub fn barres(&self) -> Vec<BarreGroup> {
        barre::detect_barres(&self.fingering)
    }
}

#[derive(Deserialize)]
struct RawChord {
    #[serde(default)]
    name: String,
    fingering: FingeringSpec,
    #[serde(default = "default_start_fret")]
    start_fret: u32,
}

fn default_start_fret() -> u32 {
    1
}

impl TryFrom<RawChord> for Chord {
    type Error = FingeringError;

    fn try_from(raw: RawChord) -> Result<Self, Self::Error> {
        Chord::new(raw.name, raw.fingering).with_start_fret(raw.start_fret)
    }
}
