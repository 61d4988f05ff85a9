//! Fretboard Core Types and Definitions
//!
//! This crate provides the foundational types for guitar chord fretboard
//! diagrams. It includes:
//!
//! - **Fingering**: Per-string finger positions ([`fingering::FingerPosition`],
//!   [`fingering::FingeringSpec`])
//! - **Chords**: A named fingering with a starting fret ([`chord::Chord`])
//! - **Barres**: Detection of barred strings ([`barre::BarreGroup`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Layered scene primitives and text metrics ([`draw`] module)

pub mod barre;
pub mod chord;
pub mod color;
pub mod draw;
pub mod fingering;
pub mod geometry;
