//! Error and warning types for TS reading and writing.

use std::string::FromUtf8Error;

use thiserror::Error;
use xml::common::Position;
use xml::reader::Error as ReaderError;
use xml::writer::Error as EmitterError;

/// A problem that makes a TS document unusable.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not well-formed XML. Positions are 1-based.
    #[error("malformed XML at {line}:{column}: {message}")]
    Xml {
        line: usize,
        column: usize,
        message: String,
    },

    /// The document element is not `<TS>`.
    #[error("expected <TS> root element, found <{found}>")]
    UnexpectedRoot { found: String },

    /// An attribute value outside the format's vocabulary.
    #[error("invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    /// An element where only text is allowed.
    #[error("unexpected <{found}> inside <{parent}>")]
    UnexpectedElement { parent: String, found: String },
}

impl ParseError {
    /// 1-based line and column, when the error has a position.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            ParseError::Xml { line, column, .. } => Some((*line, *column)),
            ParseError::UnexpectedRoot { .. }
            | ParseError::InvalidAttribute { .. }
            | ParseError::UnexpectedElement { .. } => None,
        }
    }

    pub(crate) fn missing_root() -> Self {
        ParseError::Xml {
            line: 1,
            column: 1,
            message: "document has no root element".to_string(),
        }
    }

    pub(crate) fn invalid_attribute(element: &str, attribute: &str, value: &str) -> Self {
        ParseError::InvalidAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }
}

impl From<ReaderError> for ParseError {
    fn from(err: ReaderError) -> Self {
        let position = err.position();
        ParseError::Xml {
            line: usize::try_from(position.row).unwrap_or(usize::MAX).saturating_add(1),
            column: usize::try_from(position.column).unwrap_or(usize::MAX).saturating_add(1),
            message: err.msg().to_string(),
        }
    }
}

/// A failure while serializing a catalog.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to emit XML: {0}")]
    Emit(#[from] EmitterError),

    #[error("emitted XML is not valid UTF-8")]
    InvalidUtf8(#[from] FromUtf8Error),
}

/// A non-fatal problem found while reading a catalog, or while comparing two.
///
/// The offending entry is skipped or overwritten and reading continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadWarning {
    /// A `<context>` without `<name>`; its messages were skipped.
    #[error("context #{index} has no <name>; skipped")]
    ContextWithoutName { index: usize },

    /// A second `<context>` block with a name already seen; merged.
    #[error("context '{context}' appears more than once; blocks merged")]
    DuplicateContext { context: String },

    /// A `<message>` without `<source>`; skipped.
    #[error("message #{index} in context '{context}' has no <source>; skipped")]
    MissingSource { context: String, index: usize },

    /// A `<message>` without `<translation>`; skipped.
    #[error("message '{source_text}' in context '{context}' has no <translation>; skipped")]
    MissingTranslation { context: String, source_text: String },

    /// Two messages with the same key; the later one wins.
    #[error("duplicate message '{source_text}' in context '{context}'; later entry kept")]
    DuplicateMessage { context: String, source_text: String },

    /// An element the format does not define; skipped.
    #[error("unknown element <{element}> inside <{parent}>; skipped")]
    UnknownElement { parent: String, element: String },

    /// A message in a translated catalog that its reference catalog lacks.
    #[error("message '{source_text}' in context '{context}' of '{language}' is not in the reference catalog")]
    UnknownMessage {
        context: String,
        source_text: String,
        language: String,
    },

    /// A reference message the translated catalog lacks.
    #[error("message '{source_text}' in context '{context}' is missing from '{language}'")]
    MissingMessage {
        context: String,
        source_text: String,
        language: String,
    },
}
