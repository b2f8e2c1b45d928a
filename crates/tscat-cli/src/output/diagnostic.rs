//! Miette diagnostic wrapper for TS parse errors.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use tscat::ParseError;

/// A miette-compatible diagnostic for TS parse errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(tscat::parse))]
pub struct TsDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: Option<SourceSpan>,

    message: String,

    #[help]
    help: Option<String>,
}

impl TsDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    ///
    /// Errors without a position (wrong root element, bad attribute values)
    /// are reported against the whole file without a label.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError) -> Self {
        let span = err
            .position()
            .map(|(line, column)| (byte_offset(content, line, column), 1).into());

        let help = match err {
            ParseError::UnexpectedRoot { .. } => {
                Some("a Qt Linguist catalog starts with <TS version=\"2.1\">".to_string())
            }
            ParseError::InvalidAttribute { attribute, .. } if attribute == "type" => Some(
                "translation type must be unfinished, obsolete or vanished".to_string(),
            ),
            ParseError::Xml { .. }
            | ParseError::InvalidAttribute { .. }
            | ParseError::UnexpectedElement { .. } => None,
        };

        TsDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            message: err.to_string(),
            help,
        }
    }
}

/// Convert a 1-based line and column (in characters) to a byte offset.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let column_bytes: usize = content[line_start.min(content.len())..]
        .chars()
        .take(column.saturating_sub(1))
        .map(char::len_utf8)
        .sum();

    // Clamp offset to content length to avoid miette panic on out-of-bounds
    (line_start + column_bytes).min(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_counts_characters_not_bytes() {
        let content = "<a>\nОш<b\n";
        assert_eq!(byte_offset(content, 2, 3), 4 + "Ош".len());
    }

    #[test]
    fn offset_is_clamped() {
        assert_eq!(byte_offset("abc", 10, 10), 3);
    }
}
