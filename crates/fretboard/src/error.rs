//! Error types for chord diagram rendering.
//!
//! This module provides the main error type [`FretboardError`] which wraps
//! the failures that can occur while rendering and writing a diagram.
//! Missing fonts are not errors: they are replaced by a fallback family.

use std::io;

use thiserror::Error;

use fretboard_core::fingering::FingeringError;

/// The main error type for rendering operations.
#[derive(Debug, Error)]
pub enum FretboardError {
    /// Writing the output failed. Carries the original error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid fingering: {0}")]
    Fingering(#[from] FingeringError),

    #[error("Invalid layout configuration: {0}")]
    Config(String),

    #[error("Raster error: {0}")]
    Raster(String),

    #[error("PNG encoding error: {0}")]
    Encode(String),
}

impl From<crate::export::Error> for FretboardError {
    fn from(error: crate::export::Error) -> Self {
        match error {
            crate::export::Error::Render(message) => Self::Raster(message),
            crate::export::Error::Encode(message) => Self::Encode(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_errors_convert() {
        let err: FretboardError = crate::export::Error::Render("bad scene".to_string()).into();
        assert!(matches!(err, FretboardError::Raster(ref message) if message == "bad scene"));

        let err: FretboardError = crate::export::Error::Encode("bad png".to_string()).into();
        assert_eq!(err.to_string(), "PNG encoding error: bad png");
    }
}
