//! Integration tests for the ChordDiagramBuilder API
//!
//! These tests render real bitmaps and probe pixels at positions taken from
//! the diagram layout, so they hold whichever fonts are installed.

use std::fs;

use fretboard::{
    ChordDiagramBuilder, Diagram, FretboardError,
    chord::Chord,
    config::{AppConfig, LayoutConfig, ThemeOverride},
    fingering::FingeringSpec,
};

const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];
const DARK_GREY: [u8; 4] = [169, 169, 169, 255];

fn chord(name: &str, fingering: &str, start_fret: u32) -> Chord {
    Chord::new(name, fingering.parse().expect("valid fingering"))
        .with_start_fret(start_fret)
        .expect("valid start fret")
}

fn render(chord: &Chord) -> Diagram {
    ChordDiagramBuilder::default()
        .render(chord)
        .expect("Failed to render diagram")
}

/// A pixel on the top line, halfway between the third and fourth string.
fn top_line_probe(diagram: &Diagram) -> [u8; 4] {
    let layout = diagram.layout();
    let x = ((layout.string_x(2) + layout.string_x(3)) / 2.0) as u32;
    let y = layout.origin().y().floor() as u32 + 2;
    diagram.pixel(x, y).expect("probe inside the canvas")
}

#[test]
fn test_builder_api_exists() {
    let _builder = ChordDiagramBuilder::default();
    let _builder = ChordDiagramBuilder::new(AppConfig::default());
}

#[test]
fn test_render_has_canvas_dimensions() {
    let diagram = render(&chord("C", "x 3:3 2:2 o 1:1 o", 1));
    assert_eq!(diagram.width(), 200);
    assert_eq!(diagram.height(), 250);
    assert_eq!(diagram.pixel(0, 0), Some(WHITE));
    assert_eq!(diagram.pixel(200, 0), None);
}

#[test]
fn test_render_with_custom_canvas() {
    let layout = LayoutConfig::default().with_canvas_size(240, 300);
    let builder = ChordDiagramBuilder::new(AppConfig::new(layout, ThemeOverride::default()));
    let diagram = builder
        .render(&chord("Am", "x o 2:2 2:3 1:1 o", 1))
        .expect("Failed to render diagram");

    assert_eq!((diagram.width(), diagram.height()), (240, 300));
}

#[test]
fn test_nut_drawn_only_at_first_fret() {
    let open = render(&chord("Am", "x o 2:2 2:3 1:1 o", 1));
    assert_eq!(top_line_probe(&open), BLACK);

    let moved = render(&chord("Am", "x o 2:2 2:3 1:1 o", 5));
    assert_eq!(top_line_probe(&moved), WHITE);
}

#[test]
fn test_dot_without_finger_number_is_solid() {
    // Legacy bare frets: dots without digits.
    let diagram = render(&chord("C", "x 3 2 o 1 o", 1));
    let layout = diagram.layout();

    for (string, row) in [(1, 3), (2, 2), (4, 1)] {
        let center = layout.dot_center(string, row);
        let pixel = diagram
            .pixel(center.x() as u32, center.y() as u32)
            .expect("dot inside the canvas");
        assert_eq!(pixel, BLACK, "dot on string {string}, row {row}");
    }
}

#[test]
fn test_barre_fills_between_strings() {
    let diagram = render(&chord("F (Barre)", "1:1 3:3 3:4 2:2 1:1 1:1", 1));
    let layout = diagram.layout();

    let x = ((layout.string_x(2) + layout.string_x(3)) / 2.0) as u32;
    let y = layout.row_center_y(1) as u32;
    assert_eq!(diagram.pixel(x, y), Some(DARK_GREY));

    // The dot on the first string is drawn over the barre.
    let center = layout.dot_center(0, 1);
    let pixel = diagram.pixel(center.x() as u32 - 7, center.y() as u32 - 3);
    assert_eq!(pixel, Some(BLACK));
}

#[test]
fn test_dark_theme_background() {
    let config = AppConfig::default().with_theme_override(&ThemeOverride::dark());
    let diagram = ChordDiagramBuilder::new(config)
        .render(&chord("C", "x 3:3 2:2 o 1:1 o", 1))
        .expect("Failed to render diagram");

    assert_eq!(diagram.pixel(0, 0), Some([0x22, 0x22, 0x22, 255]));
    assert_eq!(top_line_probe(&diagram), [0xcc, 0xcc, 0xcc, 255]);
}

#[test]
fn test_notes_outside_window_render() {
    let diagram = render(&chord("High", "x 9:1 o o 12:4 o", 1));
    let layout = diagram.layout();
    // Where a dot would be, right of the string line.
    let center = layout.dot_center(1, 1);
    assert_eq!(
        diagram.pixel(center.x() as u32 + 5, center.y() as u32),
        Some(WHITE)
    );
}

#[test]
fn test_empty_name_renders() {
    let diagram = render(&chord("", "o o o o o o", 1));
    assert_eq!(diagram.height(), 250);
}

#[test]
fn test_render_to_file_writes_png() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("g_major.png");

    let receipt = ChordDiagramBuilder::default()
        .render_to_file(&chord("G", "3:2 2:1 o o o 3:3", 1), &path)
        .expect("Failed to render diagram");

    assert_eq!(receipt.chord_name(), "G");
    assert_eq!(receipt.output_path(), path.as_path());

    let png = fs::read(&path).expect("Output file should exist");
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    // IHDR holds the big-endian width and height.
    assert_eq!(u32::from_be_bytes([png[16], png[17], png[18], png[19]]), 200);
    assert_eq!(u32::from_be_bytes([png[20], png[21], png[22], png[23]]), 250);
}

#[test]
fn test_free_render_function() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("c_major_dark.png");
    let fingering: FingeringSpec = "x 3:3 2:2 o 1:1 o".parse().expect("valid fingering");

    let receipt = fretboard::render("C", fingering, &path, 1, Some(&ThemeOverride::dark()))
        .expect("Failed to render diagram");

    assert_eq!(receipt.chord_name(), "C");
    assert!(path.exists());
}

#[test]
fn test_free_render_rejects_zero_start_fret() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let fingering: FingeringSpec = "o o o o o o".parse().expect("valid fingering");

    let err = fretboard::render("E5", fingering, dir.path().join("e5.png"), 0, None).unwrap_err();
    assert!(matches!(err, FretboardError::Fingering(_)));
}

#[test]
fn test_unwritable_destination_is_io_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("no").join("such").join("dir").join("c.png");
    let fingering: FingeringSpec = "x 3:3 2:2 o 1:1 o".parse().expect("valid fingering");

    let err = fretboard::render("C", fingering, &path, 1, None).unwrap_err();
    match err {
        FretboardError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
        other => panic!("Expected an I/O error, got {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn test_invalid_layout_is_config_error() {
    let layout = LayoutConfig::default().with_fret_count(1);
    let builder = ChordDiagramBuilder::new(AppConfig::new(layout, ThemeOverride::default()));

    let err = builder
        .render(&chord("C", "x 3:3 2:2 o 1:1 o", 1))
        .unwrap_err();
    assert!(matches!(err, FretboardError::Config(_)));
}

#[test]
fn test_builder_reusability() {
    let builder = ChordDiagramBuilder::default();
    let first = builder
        .render(&chord("E", "o 2:2 2:3 1:1 o o", 1))
        .expect("Failed to render first diagram");
    let second = builder
        .render(&chord("E", "o 2:2 2:3 1:1 o o", 1))
        .expect("Failed to render second diagram");

    assert_eq!(
        first.encode_png().expect("encodes"),
        second.encode_png().expect("encodes")
    );
}
