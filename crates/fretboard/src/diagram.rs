//! The rendered diagram bitmap.

use std::{fs, io::Write, path::Path};

use log::{debug, error};
use resvg::tiny_skia::Pixmap;
use tempfile::NamedTempFile;

use crate::{FretboardError, export, layout::DiagramLayout};

/// A rendered chord diagram: an immutable RGBA pixel grid.
///
/// Produced by [`ChordDiagramBuilder::render`](crate::ChordDiagramBuilder::render).
#[derive(Debug, Clone)]
pub struct Diagram {
    pixmap: Pixmap,
    layout: DiagramLayout,
}

impl Diagram {
    pub(crate) fn new(pixmap: Pixmap, layout: DiagramLayout) -> Self {
        Self { pixmap, layout }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Returns the straight (non premultiplied) `[r, g, b, a]` value of a
    /// pixel, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixmap.pixel(x, y).map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
    }

    /// The layout the diagram was drawn with.
    pub fn layout(&self) -> &DiagramLayout {
        &self.layout
    }

    /// Encodes the bitmap as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`FretboardError::Encode`] if encoding fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, FretboardError> {
        self.pixmap
            .encode_png()
            .map_err(|err| export::Error::Encode(err.to_string()).into())
    }

    /// Writes the diagram as a PNG file.
    ///
    /// The image is written to a temporary file next to `path` and renamed
    /// over it once complete, so `path` never holds a partial image.
    ///
    /// # Errors
    ///
    /// Returns [`FretboardError::Io`] with the original error if the file
    /// cannot be written, or [`FretboardError::Encode`] if encoding fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FretboardError> {
        let path = path.as_ref();
        let png = self.encode_png()?;

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let write = || -> Result<(), std::io::Error> {
            let mut file = NamedTempFile::new_in(directory)?;
            file.write_all(&png)?;
            file.as_file().sync_all()?;
            file.persist(path).map_err(|err| err.error)?;
            Ok(())
        };

        if let Err(err) = write() {
            error!(path:? = path, err:err; "Failed to write diagram");
            return Err(FretboardError::Io(err));
        }

        let bytes = fs::metadata(path).map(|meta| meta.len()).unwrap_or_default();
        debug!(path:? = path, bytes; "Diagram written");
        Ok(())
    }
}
