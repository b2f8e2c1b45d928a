//! Error types for loading and querying catalogs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;
use crate::types::TranslationStatus;

/// Errors that occur while loading a catalog into a [`CatalogSet`].
///
/// [`CatalogSet`]: crate::CatalogSet
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the catalog.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not a well-formed TS document.
    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Attempted to reload a catalog that was loaded from a string.
    #[error("cannot reload '{language}': was loaded from string, not file")]
    NoPathForReload { language: String },
}

/// A query that a [`CatalogSet`] could not answer.
///
/// [`CatalogSet`]: crate::CatalogSet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no catalog loaded for language '{language}', available: {}", .available.join(", "))]
    UnknownLanguage {
        language: String,
        available: Vec<String>,
    },

    #[error("context '{context}' not found in '{language}'{}", did_you_mean(.suggestions))]
    ContextNotFound {
        language: String,
        context: String,
        suggestions: Vec<String>,
    },

    #[error("message '{source_text}' not found in context '{context}' of '{language}'{}", did_you_mean(.suggestions))]
    MessageNotFound {
        language: String,
        context: String,
        source_text: String,
        suggestions: Vec<String>,
    },

    /// The message exists but has no usable translation.
    #[error("message '{source_text}' in context '{context}' of '{language}' is not translated ({status})")]
    Untranslated {
        language: String,
        context: String,
        source_text: String,
        status: TranslationStatus,
    },

    /// A numerus message was looked up without a count.
    #[error("message '{source_text}' in context '{context}' of '{language}' has plural forms; a count is required")]
    NumerusNeedsCount {
        language: String,
        context: String,
        source_text: String,
    },
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean: {}", suggestions.join(", "))
    }
}
