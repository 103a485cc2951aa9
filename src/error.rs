//! Error types for template resolution

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::stringify::StringifyError;

/// Errors that can occur during a resolution call.
///
/// Failure anywhere fails the entire call; no partial results are
/// returned.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A template source could not be converted to text.
    #[error(transparent)]
    Stringify(#[from] StringifyError),

    /// Token replacements reference each other in a loop.
    #[error("circular token reference detected: {chain}")]
    CircularReference { chain: String },
}

impl ResolveError {
    /// Format the error with source context using ariadne.
    ///
    /// For a circular reference the label points at the first occurrence
    /// of the offending token in `source`, falling back to the whole
    /// input when the token only appears inside replacement values.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (span, message) = match self {
            ResolveError::Stringify(err) => (0..source.len(), err.to_string()),
            ResolveError::CircularReference { chain } => {
                let span = chain
                    .split(" -> ")
                    .next()
                    .and_then(|token| {
                        source
                            .find(token)
                            .map(|start| start..start + token.len())
                    })
                    .unwrap_or(0..source.len());
                (span, format!("circular token reference: {}", chain))
            }
        };

        let mut buf = Vec::new();
        Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(&message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }
}
