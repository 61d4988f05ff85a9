//! Barre detection.
//!
//! A barre is one finger pressing several strings at the same fret. It is
//! detected by exact grouping: every fretted string with a nonzero finger is
//! keyed by its `(fret, finger)` pair, and any key shared by two or more
//! strings becomes a [`BarreGroup`]. Strings at the same fret with different
//! fingers are never merged.

use std::ops::RangeInclusive;

use indexmap::IndexMap;
use log::trace;

use crate::fingering::{FingerPosition, FingeringSpec};

/// A finger laid across two or more strings at one fret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarreGroup {
    fret: u32,
    finger: u8,
    strings: Vec<usize>,
}

impl BarreGroup {
    pub fn fret(&self) -> u32 {
        self.fret
    }

    pub fn finger(&self) -> u8 {
        self.finger
    }

    /// Member string indices in ascending order.
    pub fn strings(&self) -> &[usize] {
        &self.strings
    }

    /// Strings covered visually, from the lowest to the highest member.
    ///
    /// Strings in between are covered even when they are not members.
    pub fn span(&self) -> RangeInclusive<usize> {
        // Groups always hold at least two members.
        let first = self.strings[0];
        let last = self.strings[self.strings.len() - 1];
        first..=last
    }
}

/// Finds every barre in `fingering`, in order of first appearance.
///
/// # Examples
///
/// ```
/// # use fretboard_core::{barre::detect_barres, fingering::FingeringSpec};
/// let f_major: FingeringSpec = "1:1 3:3 3:4 2:2 1:1 1:1".parse().unwrap();
/// let barres = detect_barres(&f_major);
/// assert_eq!(barres.len(), 1);
/// assert_eq!(barres[0].strings(), &[0, 4, 5]);
/// assert_eq!(barres[0].span(), 0..=5);
/// ```
pub fn detect_barres(fingering: &FingeringSpec) -> Vec<BarreGroup> {
    let mut groups: IndexMap<(u32, u8), Vec<usize>> = IndexMap::new();

    for (string, position) in fingering.iter() {
        match position {
            FingerPosition::Fretted { fret, finger } if finger > 0 => {
                groups.entry((fret, finger)).or_default().push(string);
            }
            _ => {}
        }
    }

    groups
        .into_iter()
        .filter(|(_, strings)| strings.len() > 1)
        .map(|((fret, finger), strings)| {
            trace!(fret, finger, strings:?; "Barre detected");
            BarreGroup {
                fret,
                finger,
                strings,
            }
        })
        .collect()
}
