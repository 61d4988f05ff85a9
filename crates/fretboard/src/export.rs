//! Export of a chord diagram to pixels.
//!
//! This is the final stage of the rendering pipeline:
//!
//! ```text
//! Chord + Theme
//!     ↓ measure heading, derive DiagramLayout
//! Positions
//!     ↓ scene (this module)
//! Layered SVG document
//!     ↓ raster (this module)
//! Pixmap → PNG
//! ```
//!
//! The SVG document is internal: it is only the input of the rasterizer and
//! never written out.
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`FretboardError`](crate::FretboardError) at the crate boundary.

pub mod raster;
pub mod scene;

use thiserror::Error;

/// Errors that can occur while rasterizing or encoding a diagram.
#[derive(Debug, Error)]
pub enum Error {
    /// The scene could not be turned into pixels.
    #[error("Render error: {0}")]
    Render(String),

    /// The pixels could not be encoded as PNG.
    #[error("Encode error: {0}")]
    Encode(String),
}
