//! Per-string fingering model.
//!
//! A [`FingeringSpec`] holds exactly one [`FingerPosition`] for each of the
//! six guitar strings, ordered low to high as they are drawn left to right.
//!
//! Several input shapes are normalized into [`FingerPosition`] at the parsing
//! boundary so that rendering never has to look at the original shape:
//!
//! | Input | Result |
//! |-------|--------|
//! | `"x"`, `["x"]` | [`FingerPosition::Muted`] |
//! | `"o"`, `["o"]`, `[0]` | [`FingerPosition::Open`] |
//! | `3` (bare fret) | `Fretted { fret: 3, finger: 0 }` |
//!
//! A bare `0` names no string state and is rejected like a `[0, n]` pair.
//! | `[3, 2]` | `Fretted { fret: 3, finger: 2 }` |
//!
//! The compact text notation accepted by [`FingeringSpec::from_str`] uses the
//! same tokens, with `fret:finger` for pairs:
//!
//! ```
//! # use fretboard_core::fingering::{FingerPosition, FingeringSpec};
//! let spec: FingeringSpec = "x 3:3 2:2 o 1:1 o".parse().unwrap();
//! assert_eq!(spec.get(0), Some(FingerPosition::Muted));
//! assert_eq!(spec.get(1), Some(FingerPosition::Fretted { fret: 3, finger: 3 }));
//! ```

use std::{fmt, ops::Range, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// Number of strings on a standard guitar.
pub const STRING_COUNT: usize = 6;

/// Errors raised while building fingering data from external input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FingeringError {
    #[error("expected {expected} strings in fingering, found {found}")]
    StringCount { expected: usize, found: usize },

    #[error("fret numbers start at 1, found fret 0 with finger {finger}")]
    ZeroFret { finger: u8 },

    #[error("start fret must be at least 1, found 0")]
    ZeroStartFret,

    #[error("unrecognized fingering entry `{token}`, expected x, o, a fret number or fret:finger")]
    InvalidToken {
        token: String,
        /// Byte range of the token in the parsed text, when parsed from text.
        span: Option<Range<usize>>,
    },
}

impl FingeringError {
    /// Returns the byte range of the offending input, if known.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Self::InvalidToken { span, .. } => span.clone(),
            _ => None,
        }
    }

    fn invalid_token(token: &str) -> Self {
        Self::InvalidToken {
            token: token.to_string(),
            span: None,
        }
    }
}

/// The state of a single string in a chord diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawFingerPosition")]
pub enum FingerPosition {
    /// The string is not played.
    Muted,
    /// The string is played without being fretted.
    Open,
    /// The string is pressed at `fret` by `finger`.
    ///
    /// A finger of 0 means no finger number is shown.
    Fretted { fret: u32, finger: u8 },
}

impl FingerPosition {
    /// Creates a fretted position, rejecting fret 0.
    pub fn fretted(fret: u32, finger: u8) -> Result<Self, FingeringError> {
        if fret == 0 {
            return Err(FingeringError::ZeroFret { finger });
        }
        Ok(Self::Fretted { fret, finger })
    }

    /// Interprets a bare fret number without a finger label.
    ///
    /// # Errors
    ///
    /// Returns [`FingeringError::ZeroFret`] for fret 0. Open strings are
    /// written `o`.
    pub fn from_bare_fret(fret: u32) -> Result<Self, FingeringError> {
        Self::fretted(fret, 0)
    }

    /// Returns the fret and finger for fretted positions.
    pub fn fret_and_finger(self) -> Option<(u32, u8)> {
        match self {
            Self::Fretted { fret, finger } => Some((fret, finger)),
            Self::Muted | Self::Open => None,
        }
    }
}

impl FromStr for FingerPosition {
    type Err = FingeringError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "x" | "X" => Ok(Self::Muted),
            "o" | "O" => Ok(Self::Open),
            _ => match token.split_once(':') {
                Some((fret, finger)) => {
                    let fret = fret
                        .parse::<u32>()
                        .map_err(|_| FingeringError::invalid_token(token))?;
                    let finger = finger
                        .parse::<u8>()
                        .map_err(|_| FingeringError::invalid_token(token))?;
                    Self::fretted(fret, finger)
                }
                None => token
                    .parse::<u32>()
                    .map_err(|_| FingeringError::invalid_token(token))
                    .and_then(Self::from_bare_fret),
            },
        }
    }
}

impl fmt::Display for FingerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Muted => write!(f, "x"),
            Self::Open => write!(f, "o"),
            Self::Fretted { fret, finger: 0 } => write!(f, "{fret}"),
            Self::Fretted { fret, finger } => write!(f, "{fret}:{finger}"),
        }
    }
}

/// Untagged shapes accepted from configuration files.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFingerPosition {
    Fret(u32),
    Tag(String),
    Pair(u32, u8),
    Single((RawScalar,)),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Fret(u32),
    Tag(String),
}

impl TryFrom<RawFingerPosition> for FingerPosition {
    type Error = FingeringError;

    fn try_from(raw: RawFingerPosition) -> Result<Self, Self::Error> {
        match raw {
            RawFingerPosition::Single((RawScalar::Fret(0),)) => Ok(Self::Open),
            RawFingerPosition::Fret(fret) | RawFingerPosition::Single((RawScalar::Fret(fret),)) => {
                Self::from_bare_fret(fret)
            }
            RawFingerPosition::Tag(tag) | RawFingerPosition::Single((RawScalar::Tag(tag),)) => {
                match tag.as_str() {
                    "x" | "X" => Ok(Self::Muted),
                    "o" | "O" => Ok(Self::Open),
                    _ => Err(FingeringError::invalid_token(&tag)),
                }
            }
            RawFingerPosition::Pair(fret, finger) => Self::fretted(fret, finger),
        }
    }
}

/// The finger positions of all six strings, low string first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Vec<FingerPosition>")]
pub struct FingeringSpec {
    strings: [FingerPosition; STRING_COUNT],
}

impl FingeringSpec {
    /// Creates a fingering from exactly [`STRING_COUNT`] positions.
    ///
    /// # Errors
    ///
    /// Returns [`FingeringError::StringCount`] for any other length.
    pub fn new(positions: Vec<FingerPosition>) -> Result<Self, FingeringError> {
        let found = positions.len();
        let strings = <[FingerPosition; STRING_COUNT]>::try_from(positions).map_err(|_| {
            FingeringError::StringCount {
                expected: STRING_COUNT,
                found,
            }
        })?;
        Ok(Self { strings })
    }

    /// Returns the position of the string at `index` (0 = lowest string).
    pub fn get(&self, index: usize) -> Option<FingerPosition> {
        self.strings.get(index).copied()
    }

    /// Iterates over `(string_index, position)` pairs from left to right.
    pub fn iter(&self) -> impl Iterator<Item = (usize, FingerPosition)> + '_ {
        self.strings.iter().copied().enumerate()
    }

    pub fn as_slice(&self) -> &[FingerPosition] {
        &self.strings
    }
}

impl From<[FingerPosition; STRING_COUNT]> for FingeringSpec {
    fn from(strings: [FingerPosition; STRING_COUNT]) -> Self {
        Self { strings }
    }
}

impl TryFrom<Vec<FingerPosition>> for FingeringSpec {
    type Error = FingeringError;

    fn try_from(positions: Vec<FingerPosition>) -> Result<Self, Self::Error> {
        Self::new(positions)
    }
}

impl FromStr for FingeringSpec {
    type Err = FingeringError;

    /// Parses the compact notation, tokens separated by commas or whitespace.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut positions = Vec::with_capacity(STRING_COUNT);
        for (offset, token) in tokens(text) {
            let position = token.parse::<FingerPosition>().map_err(|err| match err {
                FingeringError::InvalidToken { token, .. } => {
                    let span = offset..offset + token.len();
                    FingeringError::InvalidToken {
                        token,
                        span: Some(span),
                    }
                }
                other => other,
            })?;
            positions.push(position);
        }
        Self::new(positions)
    }
}

impl fmt::Display for FingeringSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, position) in self.iter() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{position}")?;
        }
        Ok(())
    }
}

/// Splits text on commas and whitespace, keeping each token's byte offset.
fn tokens(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let is_separator = |c: char| c == ',' || c.is_whitespace();
    let mut rest = text;
    let mut consumed = 0;
    std::iter::from_fn(move || {
        let start = rest.find(|c: char| !is_separator(c))?;
        let after_start = &rest[start..];
        let len = after_start.find(is_separator).unwrap_or(after_start.len());
        let offset = consumed + start;
        let token = &after_start[..len];
        consumed = offset + len;
        rest = &after_start[len..];
        Some((offset, token))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        fingering: FingeringSpec,
    }

    fn fretted(fret: u32, finger: u8) -> FingerPosition {
        FingerPosition::Fretted { fret, finger }
    }

    #[test]
    fn test_position_from_str_tags() {
        assert_eq!("x".parse(), Ok(FingerPosition::Muted));
        assert_eq!("X".parse(), Ok(FingerPosition::Muted));
        assert_eq!("o".parse(), Ok(FingerPosition::Open));
        assert_eq!("O".parse(), Ok(FingerPosition::Open));
    }

    #[test]
    fn test_position_from_str_frets() {
        assert_eq!("3".parse(), Ok(fretted(3, 0)));
        assert_eq!("3:2".parse(), Ok(fretted(3, 2)));
        assert_eq!(
            "0:1".parse::<FingerPosition>(),
            Err(FingeringError::ZeroFret { finger: 1 })
        );
        assert!(matches!(
            "q".parse::<FingerPosition>(),
            Err(FingeringError::InvalidToken { .. })
        ));
        assert!("3:".parse::<FingerPosition>().is_err());
        assert!("-1".parse::<FingerPosition>().is_err());
    }

    #[test]
    fn test_bare_fret_matches_fingerless_pair() {
        assert_eq!(
            FingerPosition::from_bare_fret(5),
            FingerPosition::fretted(5, 0)
        );
    }

    #[test]
    fn test_bare_zero_fret_is_rejected() {
        assert_eq!(
            FingerPosition::from_bare_fret(0),
            Err(FingeringError::ZeroFret { finger: 0 })
        );
        assert_eq!(
            "0".parse::<FingerPosition>(),
            Err(FingeringError::ZeroFret { finger: 0 })
        );
        assert!("x 0 2:2 o 1:1 o".parse::<FingeringSpec>().is_err());

        let source = r#"fingering = [0, 1, 1, 1, 1, 1]"#;
        let err = toml::from_str::<Wrapper>(source).unwrap_err();
        assert!(err.to_string().contains("fret numbers start at 1"));
    }

    #[test]
    fn test_spec_from_str() {
        let spec: FingeringSpec = "x, 3:3, 2:2, o, 1:1, o".parse().unwrap();
        assert_eq!(
            spec.as_slice(),
            &[
                FingerPosition::Muted,
                fretted(3, 3),
                fretted(2, 2),
                FingerPosition::Open,
                fretted(1, 1),
                FingerPosition::Open,
            ]
        );
        assert_eq!(spec.to_string(), "x 3:3 2:2 o 1:1 o");
    }

    #[test]
    fn test_spec_from_str_wrong_count() {
        let err = "x 3:3 2:2".parse::<FingeringSpec>().unwrap_err();
        assert_eq!(
            err,
            FingeringError::StringCount {
                expected: 6,
                found: 3
            }
        );
    }

    #[test]
    fn test_spec_from_str_reports_token_span() {
        let text = "x 3:3  zz o 1:1 o";
        let err = text.parse::<FingeringSpec>().unwrap_err();
        let span = err.span().expect("invalid token carries a span");
        assert_eq!(&text[span], "zz");
    }

    #[test]
    fn test_spec_new_rejects_seven_strings() {
        let err = FingeringSpec::new(vec![FingerPosition::Open; 7]).unwrap_err();
        assert_eq!(
            err,
            FingeringError::StringCount {
                expected: 6,
                found: 7
            }
        );
    }

    #[test]
    fn test_spec_iter_is_left_to_right() {
        let spec = FingeringSpec::from([
            fretted(1, 1),
            FingerPosition::Open,
            FingerPosition::Open,
            FingerPosition::Open,
            FingerPosition::Open,
            FingerPosition::Muted,
        ]);
        let indices: Vec<usize> = spec.iter().map(|(index, _)| index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(spec.get(5), Some(FingerPosition::Muted));
        assert_eq!(spec.get(6), None);
    }

    #[test]
    fn test_deserialize_all_shapes() {
        let source = r#"fingering = [["x"], [3, 3], 2, "o", [1, 1], [0]]"#;
        let wrapper: Wrapper = toml::from_str(source).unwrap();
        assert_eq!(
            wrapper.fingering.as_slice(),
            &[
                FingerPosition::Muted,
                fretted(3, 3),
                fretted(2, 0),
                FingerPosition::Open,
                fretted(1, 1),
                FingerPosition::Open,
            ]
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_tag() {
        let source = r#"fingering = ["m", 1, 1, 1, 1, 1]"#;
        let err = toml::from_str::<Wrapper>(source).unwrap_err();
        assert!(err.to_string().contains("unrecognized fingering entry `m`"));
    }

    #[test]
    fn test_deserialize_rejects_wrong_length() {
        let source = r#"fingering = [1, 1, 1]"#;
        let err = toml::from_str::<Wrapper>(source).unwrap_err();
        assert!(err.to_string().contains("expected 6 strings"));
    }

    #[test]
    fn test_deserialize_rejects_zero_fret_pair() {
        let source = r#"fingering = [[0, 2], 1, 1, 1, 1, 1]"#;
        assert!(toml::from_str::<Wrapper>(source).is_err());
    }
}
