use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use fretboard_cli::{Args, CliError, ThemePreset};

/// Repository directory holding the sample chord files
fn chords_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../chords")
}

/// Collects all .toml files from a directory
fn collect_chord_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &Path, output: &Path) -> Args {
    Args {
        input: Some(input.to_string_lossy().to_string()),
        output: output.to_string_lossy().to_string(),
        config: None,
        name: None,
        fingering: None,
        start_fret: None,
        theme: None,
        log_level: "off".to_string(),
    }
}

fn is_png(path: &Path) -> bool {
    fs::read(path)
        .map(|bytes| bytes.starts_with(b"\x89PNG\r\n\x1a\n"))
        .unwrap_or(false)
}

#[test]
fn e2e_smoke_test_valid_chords() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_chords = collect_chord_files(chords_dir());

    assert!(!valid_chords.is_empty(), "No chord files found in chords/");

    let mut failed_chords = Vec::new();

    for chord_path in &valid_chords {
        let output_filename = format!(
            "{}.png",
            chord_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        match fretboard_cli::run(&args_for(chord_path, &output_path)) {
            Ok(_) if is_png(&output_path) => {}
            Ok(_) => failed_chords.push((chord_path.clone(), "output is not a PNG".to_string())),
            Err(e) => failed_chords.push((chord_path.clone(), e.to_string())),
        }
    }

    if !failed_chords.is_empty() {
        eprintln!("\nChord files that failed:");
        for (path, err) in &failed_chords {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} chord file(s) failed unexpectedly", failed_chords.len());
    }

    println!("✅ All {} chord files rendered", valid_chords.len());
}

#[test]
fn e2e_smoke_test_error_chords() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_chords = collect_chord_files(chords_dir().join("errors"));

    assert!(
        !error_chords.is_empty(),
        "No error chord files found in chords/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for chord_path in &error_chords {
        let output_filename = format!(
            "error_{}.png",
            chord_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if fretboard_cli::run(&args_for(chord_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(chord_path.clone());
        }
        assert!(
            !output_path.exists(),
            "{} left an output file behind",
            chord_path.display()
        );
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError chord files that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error chord file(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error chord files failed as expected",
        error_chords.len()
    );
}

#[test]
fn e2e_flags_only_with_dark_theme() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("c_dark.png");

    let args = Args {
        input: None,
        output: output_path.to_string_lossy().to_string(),
        config: None,
        name: Some("C".to_string()),
        fingering: Some("x 3:3 2:2 o 1:1 o".to_string()),
        start_fret: None,
        theme: Some(ThemePreset::Dark),
        log_level: "off".to_string(),
    };

    let receipt = fretboard_cli::run(&args).expect("flags-only chord should render");
    assert_eq!(receipt.chord_name(), "C");
    assert_eq!(receipt.output_path(), output_path.as_path());
    assert!(is_png(&output_path));
}

#[test]
fn e2e_theme_from_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("f_dark.png");

    let config_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../themes/dark.toml");
    let mut args = args_for(&chords_dir().join("f_barre.toml"), &output_path);
    args.config = Some(config_path.to_string_lossy().to_string());

    fretboard_cli::run(&args).expect("dark theme config should render");
    assert!(is_png(&output_path));
}

#[test]
fn e2e_missing_output_directory_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("missing").join("c.png");

    let err = fretboard_cli::run(&args_for(&chords_dir().join("c_major.toml"), &output_path))
        .unwrap_err();
    assert!(
        matches!(
            err,
            CliError::Fretboard(fretboard::FretboardError::Io(ref io))
                if io.kind() == std::io::ErrorKind::NotFound
        ),
        "unexpected error: {err:?}"
    );
}
