//! Rasterization of the composed scene with resvg.

use std::sync::{Arc, OnceLock};

use log::{debug, info};
use resvg::{
    tiny_skia::{Pixmap, Transform},
    usvg::{self, fontdb},
};
use svg::Document;

use super::Error;

static SYSTEM_FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();

/// The system font database, loaded on first use.
fn system_fonts() -> Arc<fontdb::Database> {
    Arc::clone(SYSTEM_FONTS.get_or_init(|| {
        let mut database = fontdb::Database::new();
        database.load_system_fonts();
        info!(faces = database.len(); "Loaded system fonts for rasterization");
        Arc::new(database)
    }))
}

/// Renders `document` into a `width`×`height` pixmap.
///
/// `fonts` holds font files loaded from disk during measurement, so text is
/// drawn with the same faces it was measured with. Text naming no installed
/// family is drawn with `default_family`.
///
/// # Errors
///
/// Returns [`Error::Render`] if the scene cannot be parsed or the pixmap
/// cannot be allocated.
pub fn rasterize(
    document: &Document,
    width: u32,
    height: u32,
    fonts: &[Arc<Vec<u8>>],
    default_family: Option<&str>,
) -> Result<Pixmap, Error> {
    let mut options = usvg::Options {
        fontdb: system_fonts(),
        ..usvg::Options::default()
    };
    if let Some(family) = default_family {
        options.font_family = family.to_string();
    }
    if !fonts.is_empty() {
        let database = options.fontdb_mut();
        for data in fonts {
            database.load_font_source(fontdb::Source::Binary(data.clone()));
        }
    }

    let tree = usvg::Tree::from_str(&document.to_string(), &options)
        .map_err(|err| Error::Render(format!("invalid scene: {err}")))?;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::Render(format!("cannot allocate a {width}x{height} pixmap")))?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    debug!(width, height; "Scene rasterized");
    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use svg::node::element::Rectangle;

    use super::*;

    #[test]
    fn test_rasterize_fills_canvas() {
        let document = Document::new()
            .set("viewBox", "0 0 4 3")
            .set("width", 4)
            .set("height", 3)
            .add(
                Rectangle::new()
                    .set("width", 4)
                    .set("height", 3)
                    .set("fill", "#ff0000"),
            );

        let pixmap = rasterize(&document, 4, 3, &[], None).unwrap();
        assert_eq!(pixmap.width(), 4);
        assert_eq!(pixmap.height(), 3);

        let pixel = pixmap.pixel(2, 1).unwrap().demultiply();
        assert_eq!(
            [pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()],
            [255, 0, 0, 255]
        );
    }

    #[test]
    fn test_rasterize_rejects_empty_canvas() {
        let document = Document::new().set("viewBox", "0 0 10 10");
        let result = rasterize(&document, 0, 10, &[], None);
        assert!(matches!(result, Err(Error::Render(_))));
    }
}
