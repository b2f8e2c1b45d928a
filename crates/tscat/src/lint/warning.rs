use thiserror::Error;

use crate::lint::LintRule;

/// One finding of [`lint_catalog`](crate::lint_catalog).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    #[error("empty <source> in context '{context}'")]
    EmptySource { context: String },

    #[error("finished translation of '{source_text}' in context '{context}' is empty")]
    EmptyTranslation { context: String, source_text: String },

    /// `form` is the numerus form index, if the message has plural forms.
    #[error(
        "placeholders of '{source_text}' in context '{context}' differ{}: expected {expected}, found {found}",
        form_suffix(.form)
    )]
    PlaceholderMismatch {
        context: String,
        source_text: String,
        form: Option<usize>,
        expected: String,
        found: String,
    },

    #[error(
        "'{source_text}' in context '{context}' has {found} numerus form(s), '{language}' needs {expected}"
    )]
    NumerusFormCount {
        context: String,
        source_text: String,
        language: String,
        expected: usize,
        found: usize,
    },

    #[error("catalog language '{language}' is not a valid locale identifier")]
    UnknownLanguage { language: String },
}

impl LintWarning {
    /// The rule that produced this warning.
    pub fn rule(&self) -> LintRule {
        match self {
            LintWarning::EmptySource { .. } => LintRule::EmptySource,
            LintWarning::EmptyTranslation { .. } => LintRule::EmptyTranslation,
            LintWarning::PlaceholderMismatch { .. } => LintRule::PlaceholderMismatch,
            LintWarning::NumerusFormCount { .. } => LintRule::NumerusFormCount,
            LintWarning::UnknownLanguage { .. } => LintRule::UnknownLanguage,
        }
    }

    /// The context the warning is about, if it concerns a message.
    pub fn context(&self) -> Option<&str> {
        match self {
            LintWarning::EmptySource { context }
            | LintWarning::EmptyTranslation { context, .. }
            | LintWarning::PlaceholderMismatch { context, .. }
            | LintWarning::NumerusFormCount { context, .. } => Some(context),
            LintWarning::UnknownLanguage { .. } => None,
        }
    }
}

fn form_suffix(form: &Option<usize>) -> String {
    form.map(|index| format!(" in numerus form {index}"))
        .unwrap_or_default()
}
