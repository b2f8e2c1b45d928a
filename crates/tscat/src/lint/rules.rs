use std::collections::BTreeMap;
use std::iter;

use icu_locale_core::Locale;

use crate::catalog::{Catalog, Context, Message, TranslationBody};
use crate::lint::{LintConfig, LintRule, LintWarning};
use crate::lookup::numerus_form_count;
use crate::parser::arg_counts;

/// Source strings Qt Designer leaves behind in generated UI code. Nobody
/// translates them, so an empty finished translation is expected.
const DESIGNER_PLACEHOLDERS: &[&str] = &["Form", "Dialog", "TextLabel", "x", "..."];

/// Runs every enabled lint rule over `catalog`.
///
/// Warnings come out in document order, catalog-level warnings first.
pub fn lint_catalog(catalog: &Catalog, config: &LintConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    if config.is_enabled(LintRule::UnknownLanguage) {
        lint_unknown_language(catalog, &mut warnings);
    }

    let plural_forms = catalog.language().and_then(numerus_form_count);

    for (context, message) in catalog.messages() {
        if config.is_enabled(LintRule::EmptySource) {
            lint_empty_source(context, message, &mut warnings);
        }
        if config.is_enabled(LintRule::EmptyTranslation) {
            lint_empty_translation(context, message, config, &mut warnings);
        }
        if config.is_enabled(LintRule::PlaceholderMismatch) {
            lint_placeholder_mismatch(context, message, &mut warnings);
        }
        if !config.is_enabled(LintRule::NumerusFormCount) {
            continue;
        }
        if let (Some(language), Some(expected)) = (catalog.language(), plural_forms) {
            lint_numerus_form_count(context, message, language, expected, &mut warnings);
        }
    }

    tracing::debug!(
        language = catalog.language().unwrap_or_default(),
        warnings = warnings.len(),
        "Linted catalog"
    );
    warnings
}

/// True for sources that are expected to stay untranslated.
///
/// That covers Qt Designer's default widget titles, the strings listed in
/// [`LintConfig::layout_placeholders`], and sources without a single letter
/// (`":"`, `"%1/%2"`, `"-"`).
pub fn is_layout_placeholder(source: &str, config: &LintConfig) -> bool {
    DESIGNER_PLACEHOLDERS.contains(&source)
        || config.layout_placeholders.iter().any(|p| p == source)
        || !source.chars().any(char::is_alphabetic)
}

fn lint_unknown_language(catalog: &Catalog, warnings: &mut Vec<LintWarning>) {
    let Some(language) = catalog.language().filter(|language| !language.is_empty()) else {
        return;
    };
    // Qt writes POSIX-style tags (`pt_BR`); BCP-47 wants a hyphen.
    if Locale::try_from_str(&language.replace('_', "-")).is_err() {
        warnings.push(LintWarning::UnknownLanguage {
            language: language.to_string(),
        });
    }
}

fn lint_empty_source(context: &Context, message: &Message, warnings: &mut Vec<LintWarning>) {
    if message.source.is_empty() {
        warnings.push(LintWarning::EmptySource {
            context: context.name().to_string(),
        });
    }
}

/// Only finished translations count: unfinished ones are empty by nature,
/// and retired ones are never shown.
fn lint_empty_translation(
    context: &Context,
    message: &Message,
    config: &LintConfig,
    warnings: &mut Vec<LintWarning>,
) {
    if message.source.is_empty() || !message.status().is_active() {
        return;
    }
    if message.status().is_finished()
        && message.translation.is_empty()
        && !is_layout_placeholder(&message.source, config)
    {
        warnings.push(LintWarning::EmptyTranslation {
            context: context.name().to_string(),
            source_text: message.source.clone(),
        });
    }
}

/// Compares positional markers between the source and every non-empty
/// translation form, ignoring order. `%n` is not compared: numerus forms
/// such as the singular may legitimately leave the count out.
fn lint_placeholder_mismatch(
    context: &Context,
    message: &Message,
    warnings: &mut Vec<LintWarning>,
) {
    if !message.status().is_active() {
        return;
    }
    let expected = arg_counts(&message.source);

    let forms: Vec<(Option<usize>, &str)> = match &message.translation.body {
        TranslationBody::Text(text) => vec![(None, text.as_str())],
        TranslationBody::LengthVariants(variants) => {
            variants.iter().map(|variant| (None, variant.as_str())).collect()
        }
        TranslationBody::Numerus(forms) => forms
            .iter()
            .enumerate()
            .map(|(index, form)| (Some(index), form.as_str()))
            .collect(),
    };

    for (form, text) in forms {
        if text.is_empty() {
            continue;
        }
        let found = arg_counts(text);
        if found != expected {
            warnings.push(LintWarning::PlaceholderMismatch {
                context: context.name().to_string(),
                source_text: message.source.clone(),
                form,
                expected: describe_markers(&expected),
                found: describe_markers(&found),
            });
        }
    }
}

fn lint_numerus_form_count(
    context: &Context,
    message: &Message,
    language: &str,
    expected: usize,
    warnings: &mut Vec<LintWarning>,
) {
    if !message.numerus || !message.status().is_active() {
        return;
    }
    let found = message.translation.forms().len();
    if found != expected {
        warnings.push(LintWarning::NumerusFormCount {
            context: context.name().to_string(),
            source_text: message.source.clone(),
            language: language.to_string(),
            expected,
            found,
        });
    }
}

/// Renders marker counts as `%1, %1, %2`, or `none`.
fn describe_markers(counts: &BTreeMap<u8, usize>) -> String {
    let markers: Vec<String> = counts
        .iter()
        .flat_map(|(number, count)| iter::repeat_n(format!("%{number}"), *count))
        .collect();
    if markers.is_empty() {
        "none".to_string()
    } else {
        markers.join(", ")
    }
}
