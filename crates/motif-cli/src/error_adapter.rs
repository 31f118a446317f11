//! Error adapter for converting MotifError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use motif::{MotifError, arrange::GenerateError, pacer::EmitError};

/// Adapter giving a [`MotifError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a MotifError);

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
        // Wrapped errors already print their own message.
        match self.0 {
            MotifError::Generate(err) => std::error::Error::source(err),
            MotifError::Model(err) => std::error::Error::source(err),
            MotifError::Emit(err) => std::error::Error::source(err),
            MotifError::Io(err) => std::error::Error::source(err),
        }
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            MotifError::Io(_) => "motif::io",
            MotifError::Generate(
                GenerateError::DegenerateBounds(_) | GenerateError::GridTooLarge { .. },
            ) => "motif::bounds",
            MotifError::Generate(GenerateError::UnsupportedKind { .. }) | MotifError::Model(_) => {
                "motif::kind"
            }
            MotifError::Emit(EmitError::Sink { .. }) => "motif::sink",
            MotifError::Emit(EmitError::Cancelled { .. }) => "motif::cancelled",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            MotifError::Generate(GenerateError::DegenerateBounds(_)) => {
                "canvas width and height must be positive".to_string()
            }
            MotifError::Generate(GenerateError::GridTooLarge { .. }) => {
                "use fewer mosaic columns or a canvas closer to square".to_string()
            }
            MotifError::Generate(GenerateError::UnsupportedKind { variant, .. }) => {
                kinds_help(*variant)
            }
            MotifError::Model(motif::model::ModelError::UnsupportedKind { variant, .. }) => {
                kinds_help(*variant)
            }
            MotifError::Emit(err) => format!(
                "{} placement(s) were already placed and remain on the canvas",
                err.emitted()
            ),
            MotifError::Io(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

fn kinds_help(variant: motif::variant::Variant) -> String {
    let kinds: Vec<String> = variant
        .capabilities()
        .kinds()
        .iter()
        .map(ToString::to_string)
        .collect();
    format!("the `{variant}` variant offers: {}", kinds.join(", "))
}

#[cfg(test)]
mod tests {
    use std::io;

    use motif::{
        canvas::CanvasError, kind::ArrangementKind, model::ModelError, sink::SinkError,
        variant::Variant,
    };

    use super::*;

    fn code(err: &MotifError) -> String {
        ErrorAdapter(err).code().unwrap().to_string()
    }

    fn help(err: &MotifError) -> Option<String> {
        ErrorAdapter(err).help().map(|h| h.to_string())
    }

    #[test]
    fn test_codes() {
        let bounds = MotifError::Generate(GenerateError::DegenerateBounds(
            CanvasError::Degenerate {
                width: 0.0,
                height: 10.0,
            },
        ));
        assert_eq!(code(&bounds), "motif::bounds");

        let grid = MotifError::Generate(GenerateError::GridTooLarge {
            columns: 64,
            rows: 6.4e31,
        });
        assert_eq!(code(&grid), "motif::bounds");
        assert_eq!(
            help(&grid).unwrap(),
            "use fewer mosaic columns or a canvas closer to square"
        );

        let sink = MotifError::Emit(EmitError::Sink {
            index: 1,
            emitted: 1,
            source: SinkError::new("rate limited"),
        });
        assert_eq!(code(&sink), "motif::sink");

        let cancelled = MotifError::Emit(EmitError::Cancelled { emitted: 4 });
        assert_eq!(code(&cancelled), "motif::cancelled");

        let io = MotifError::Io(io::Error::other("boom"));
        assert_eq!(code(&io), "motif::io");
        assert_eq!(help(&io), None);
    }

    #[test]
    fn test_kind_help_lists_variant_kinds() {
        let err = MotifError::Model(ModelError::UnsupportedKind {
            kind: ArrangementKind::Spiral,
            variant: Variant::Shapes,
        });

        assert_eq!(code(&err), "motif::kind");
        assert_eq!(
            help(&err).unwrap(),
            "the `shapes` variant offers: horizontal, circle, wave"
        );
    }

    #[test]
    fn test_emit_help_counts_placed() {
        let err = MotifError::Emit(EmitError::Cancelled { emitted: 4 });
        assert_eq!(
            help(&err).unwrap(),
            "4 placement(s) were already placed and remain on the canvas"
        );
    }

    #[test]
    fn test_sink_cause_is_exposed() {
        use std::error::Error;

        let err = MotifError::Emit(EmitError::Sink {
            index: 0,
            emitted: 0,
            source: SinkError::new("rate limited"),
        });
        let adapter = ErrorAdapter(&err);
        assert_eq!(adapter.source().unwrap().to_string(), "rate limited");
    }
}
