//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! This module provides the bridge between the CLI's error types and miette's
//! rich diagnostic formatting. Errors that point into some input text (a
//! chord file, a configuration file, the `--fingering` value) are rendered
//! with a source snippet; every other error is rendered as a plain report.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use fretboard::FretboardError;

use crate::error::CliError;

/// Adapter for an error located in some input text.
pub struct SnippetAdapter<'a> {
    /// The error being reported
    err: &'a CliError,
    /// Diagnostic code
    code: &'static str,
    /// Text the span points into
    src: &'a str,
    /// Byte range of the offending input
    span: Option<Range<usize>>,
    /// Message attached to the span
    label: String,
    help: Option<&'static str>,
}

impl fmt::Debug for SnippetAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnippetAdapter")
            .field("err", &self.err)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for SnippetAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for SnippetAdapter<'_> {}

impl MietteDiagnostic for SnippetAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help.map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span.clone()?;
        let label = LabeledSpan::new_primary_with_span(Some(self.label.clone()), to_miette(span));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for errors without a location in the input.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(error_code(self.0)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.0 {
            CliError::MissingInput => Some(Box::new(
                "example: fretboard --name C --fingering \"x 3:3 2:2 o 1:1 o\"",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An error with a source snippet.
    Snippet(SnippetAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Snippet(s) => fmt::Display::fmt(s, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Snippet(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Snippet(s) => s.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Snippet(s) => s.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Snippet(s) => s.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Snippet(s) => s.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn to_miette(span: Range<usize>) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

fn error_code(err: &CliError) -> &'static str {
    match err {
        CliError::Fretboard(err) => match err {
            FretboardError::Io(_) => "fretboard::io",
            FretboardError::Fingering(_) => "fretboard::fingering",
            FretboardError::Config(_) => "fretboard::layout",
            FretboardError::Raster(_) => "fretboard::raster",
            FretboardError::Encode(_) => "fretboard::encode",
        },
        CliError::Config(_) => "fretboard::config",
        CliError::ChordFile { .. } => "fretboard::chord_file",
        CliError::Read { .. } => "fretboard::io",
        CliError::Fingering { .. } => "fretboard::fingering",
        CliError::MissingInput => "fretboard::usage",
    }
}

/// Convert a [`CliError`] into a reportable error.
///
/// Errors located in a chord file, configuration file or the `--fingering`
/// value become [`Reportable::Snippet`]; the rest become
/// [`Reportable::Error`].
pub fn to_reportable(err: &CliError) -> Reportable<'_> {
    match err {
        CliError::ChordFile { src, err: toml_err, .. } => Reportable::Snippet(SnippetAdapter {
            err,
            code: error_code(err),
            src,
            span: toml_err.span(),
            label: toml_err.message().to_string(),
            help: Some(
                "entries are \"x\", \"o\", [fret, finger], or a bare fret number; exactly 6 strings",
            ),
        }),
        CliError::Config(config_err) => match config_err.source_span() {
            Some((src, span, message)) => Reportable::Snippet(SnippetAdapter {
                err,
                code: error_code(err),
                src,
                span,
                label: message.to_string(),
                help: None,
            }),
            None => Reportable::Error(ErrorAdapter(err)),
        },
        CliError::Fingering {
            input,
            err: fingering_err,
        } => Reportable::Snippet(SnippetAdapter {
            err,
            code: error_code(err),
            src: input,
            span: fingering_err.span(),
            label: fingering_err.to_string(),
            help: Some("use x, o, a fret number, or fret:finger for each of the 6 strings"),
        }),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use fretboard::fingering::FingeringSpec;

    use crate::config::ConfigError;

    use super::*;

    fn fingering_error(input: &str) -> CliError {
        let err = input.parse::<FingeringSpec>().unwrap_err();
        CliError::Fingering {
            input: input.to_string(),
            err,
        }
    }

    #[test]
    fn test_fingering_error_has_snippet() {
        let err = fingering_error("x 3:3 2:2 o 1:1 zz");
        let reportable = to_reportable(&err);

        match &reportable {
            Reportable::Snippet(s) => {
                let labels: Vec<_> = s.labels().unwrap().collect();
                assert_eq!(labels.len(), 1);
                assert_eq!(labels[0].offset(), 16);
                assert_eq!(labels[0].len(), 2);
                assert!(labels[0].primary());
            }
            Reportable::Error(_) => panic!("Expected Snippet"),
        }
        assert_eq!(
            reportable.code().map(|c| c.to_string()),
            Some("fretboard::fingering".to_string())
        );
    }

    #[test]
    fn test_string_count_error_has_no_label() {
        let err = fingering_error("x 3:3 2:2");
        let reportable = to_reportable(&err);
        assert!(reportable.labels().is_none());
        assert!(reportable.source_code().is_some());
    }

    #[test]
    fn test_chord_file_error_has_snippet() {
        let src = "name = \"C\"\nfingering = [\"x\", \"q\", \"o\", \"o\", \"o\", \"o\"]\n";
        let toml_err = toml::from_str::<fretboard::chord::Chord>(src).unwrap_err();
        let err = CliError::ChordFile {
            path: PathBuf::from("c.toml"),
            src: src.to_string(),
            err: toml_err,
        };

        let reportable = to_reportable(&err);
        assert!(matches!(reportable, Reportable::Snippet(_)));
        assert_eq!(reportable.to_string(), "Invalid chord file c.toml");
        assert_eq!(reportable.labels().map(|labels| labels.count()), Some(1));
    }

    #[test]
    fn test_missing_config_is_plain_error() {
        let err = CliError::Config(ConfigError::MissingFile(PathBuf::from("nope.toml")));
        let reportable = to_reportable(&err);

        match &reportable {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Missing configuration file: nope.toml");
            }
            Reportable::Snippet(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_io_error_code() {
        let err = CliError::Fretboard(FretboardError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        )));
        let reportable = to_reportable(&err);
        assert_eq!(
            reportable.code().map(|c| c.to_string()),
            Some("fretboard::io".to_string())
        );
        assert_eq!(reportable.to_string(), "I/O error: denied");
    }

    #[test]
    fn test_missing_input_has_help() {
        let reportable = to_reportable(&CliError::MissingInput);
        assert!(reportable.help().is_some());
    }
}
