//! Multi-language catalog storage.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;

use crate::catalog::{Catalog, LookupPolicy, Message};
use crate::lookup::error::{LoadError, LookupError};
use crate::lookup::suggest::compute_suggestions;
use crate::parser::{LoadWarning, read_catalog};

/// Catalogs for several languages of one application.
///
/// Each language has exactly one catalog. Loading a language again replaces
/// its previous catalog. Missing translations are reported as errors with
/// suggestions rather than silently falling back, so tooling can tell a typo
/// in a context name from an untranslated string.
///
/// # Example
///
/// ```
/// use tscat::CatalogSet;
///
/// let mut set = CatalogSet::new();
/// set.load_str(r#"<!DOCTYPE TS>
/// <TS version="2.1" language="bg">
/// <context>
///     <name>CrashReportDialog</name>
///     <message>
///         <source>Dump file</source>
///         <translation>Дъмп-файл</translation>
///     </message>
/// </context>
/// </TS>"#, "und").unwrap();
///
/// assert_eq!(set.translate("bg", "CrashReportDialog", "Dump file").unwrap(), "Дъмп-файл");
/// assert!(set.translate("bg", "CrashReportDialg", "Dump file").is_err());
/// ```
#[derive(Debug, Default, Builder)]
pub struct CatalogSet {
    /// Which translation states count as translated.
    #[builder(default)]
    policy: LookupPolicy,

    #[builder(skip)]
    catalogs: BTreeMap<String, Catalog>,

    /// Load warnings per language, from the most recent load.
    #[builder(skip)]
    warnings: HashMap<String, Vec<LoadWarning>>,

    /// File paths for reload support: language -> PathBuf.
    #[builder(skip)]
    loaded_paths: HashMap<String, PathBuf>,
}

impl CatalogSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy(&self) -> LookupPolicy {
        self.policy
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load a `.ts` file, returning the language it was registered under.
    ///
    /// The language is taken from the catalog's `language` attribute, or from
    /// the file name when the attribute is missing (`scantailor_ru.ts` -> `ru`).
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<String, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let fallback = language_from_path(path).unwrap_or_default();
        let language = self.load_internal(&content, &fallback, path)?;
        self.loaded_paths
            .insert(language.clone(), path.to_path_buf());
        Ok(language)
    }

    /// Load a catalog from a string.
    ///
    /// `fallback_language` is used when the catalog has no `language`
    /// attribute. Catalogs loaded this way cannot be reloaded.
    pub fn load_str(
        &mut self,
        content: &str,
        fallback_language: &str,
    ) -> Result<String, LoadError> {
        let pseudo_path = PathBuf::from(format!("<{fallback_language}>"));
        let language = self.load_internal(content, fallback_language, &pseudo_path)?;
        self.loaded_paths.remove(&language);
        Ok(language)
    }

    /// Re-read a catalog from the file it was loaded from.
    pub fn reload(&mut self, language: &str) -> Result<String, LoadError> {
        let path = self
            .loaded_paths
            .get(language)
            .cloned()
            .ok_or_else(|| LoadError::NoPathForReload {
                language: language.to_string(),
            })?;
        self.load_file(path)
    }

    /// Register an already built catalog under `language`.
    pub fn insert(&mut self, language: impl Into<String>, catalog: Catalog) {
        let language = language.into();
        self.loaded_paths.remove(&language);
        self.warnings.remove(&language);
        self.catalogs.insert(language, catalog);
    }

    fn load_internal(
        &mut self,
        content: &str,
        fallback_language: &str,
        path: &Path,
    ) -> Result<String, LoadError> {
        let output = read_catalog(content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let language = output
            .catalog
            .language()
            .filter(|language| !language.is_empty())
            .unwrap_or(fallback_language)
            .to_string();

        for warning in &output.warnings {
            tracing::warn!(path = %path.display(), "{warning}");
        }
        tracing::debug!(
            path = %path.display(),
            language = %language,
            messages = output.catalog.message_count(),
            "loaded catalog"
        );

        self.warnings.insert(language.clone(), output.warnings);
        self.catalogs.insert(language.clone(), output.catalog);
        Ok(language)
    }

    // =========================================================================
    // Access
    // =========================================================================

    pub fn catalog(&self, language: &str) -> Option<&Catalog> {
        self.catalogs.get(language)
    }

    pub fn catalog_mut(&mut self, language: &str) -> Option<&mut Catalog> {
        self.catalogs.get_mut(language)
    }

    /// Loaded languages in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    /// Warnings produced when `language` was last loaded.
    pub fn warnings(&self, language: &str) -> &[LoadWarning] {
        self.warnings.get(language).map(Vec::as_slice).unwrap_or_default()
    }

    /// The path a language was loaded from, if it came from a file.
    pub fn path(&self, language: &str) -> Option<&Path> {
        self.loaded_paths.get(language).map(PathBuf::as_path)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Translate `source` in `context` for `language`.
    pub fn translate(
        &self,
        language: &str,
        context: &str,
        source: &str,
    ) -> Result<&str, LookupError> {
        self.translate_disambiguated(language, context, source, "")
    }

    /// Translate a message that carries a disambiguation comment.
    ///
    /// Numerus messages need a count and fail with
    /// [`LookupError::NumerusNeedsCount`]; use [`CatalogSet::translate_plural`].
    pub fn translate_disambiguated(
        &self,
        language: &str,
        context: &str,
        source: &str,
        comment: &str,
    ) -> Result<&str, LookupError> {
        let (catalog, message) = self.locate(language, context, source, comment)?;
        if message.numerus {
            return Err(LookupError::NumerusNeedsCount {
                language: language.to_string(),
                context: context.to_string(),
                source_text: source.to_string(),
            });
        }
        catalog
            .translate_with(self.policy, context, source, comment)
            .ok_or_else(|| untranslated(language, context, message))
    }

    /// Translate a message for the count `n`, substituting `%n`.
    ///
    /// Plain messages are accepted too; their single text is used.
    pub fn translate_plural(
        &self,
        language: &str,
        context: &str,
        source: &str,
        comment: &str,
        n: i64,
    ) -> Result<String, LookupError> {
        let (catalog, message) = self.locate(language, context, source, comment)?;
        catalog
            .translate_plural_with(self.policy, context, source, comment, n)
            .ok_or_else(|| untranslated(language, context, message))
    }

    fn locate(
        &self,
        language: &str,
        context: &str,
        source: &str,
        comment: &str,
    ) -> Result<(&Catalog, &Message), LookupError> {
        let catalog = self
            .catalogs
            .get(language)
            .ok_or_else(|| LookupError::UnknownLanguage {
                language: language.to_string(),
                available: self.catalogs.keys().cloned().collect(),
            })?;

        let Some(context_block) = catalog.context(context) else {
            return Err(LookupError::ContextNotFound {
                language: language.to_string(),
                context: context.to_string(),
                suggestions: compute_suggestions(
                    context,
                    catalog.contexts().iter().map(|c| c.name()),
                ),
            });
        };

        let Some(message) = context_block.get(source, comment) else {
            return Err(LookupError::MessageNotFound {
                language: language.to_string(),
                context: context.to_string(),
                source_text: source.to_string(),
                suggestions: compute_suggestions(source, context_block.sources()),
            });
        };

        Ok((catalog, message))
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Compare the keys of a target catalog against a reference catalog.
    ///
    /// Reports active messages of the target that the reference does not have,
    /// and reference messages the target is missing. Retired messages in the
    /// target are expected to be absent from the reference and are skipped.
    /// Returns an empty vector if either language is not loaded.
    pub fn compare(&self, reference_language: &str, target_language: &str) -> Vec<LoadWarning> {
        let mut warnings = Vec::new();

        let Some(reference) = self.catalogs.get(reference_language) else {
            return warnings;
        };
        let Some(target) = self.catalogs.get(target_language) else {
            return warnings;
        };

        for (context, message) in target.messages() {
            if !message.status().is_active() {
                continue;
            }
            if reference
                .message(context.name(), &message.source, message.comment_or_empty())
                .is_none()
            {
                warnings.push(LoadWarning::UnknownMessage {
                    context: context.name().to_string(),
                    source_text: message.source.clone(),
                    language: target_language.to_string(),
                });
            }
        }

        for (context, message) in reference.messages() {
            if !message.status().is_active() {
                continue;
            }
            if target
                .message(context.name(), &message.source, message.comment_or_empty())
                .is_none()
            {
                warnings.push(LoadWarning::MissingMessage {
                    context: context.name().to_string(),
                    source_text: message.source.clone(),
                    language: target_language.to_string(),
                });
            }
        }

        warnings
    }
}

fn untranslated(language: &str, context: &str, message: &Message) -> LookupError {
    LookupError::Untranslated {
        language: language.to_string(),
        context: context.to_string(),
        source_text: message.source.clone(),
        status: message.status(),
    }
}

/// Guess a catalog's language from its file name.
///
/// Qt projects name catalogs `<app>_<lang>.ts` or `<app>_<lang>_<REGION>.ts`.
///
/// ```
/// use std::path::Path;
/// use tscat::lookup::language_from_path;
///
/// assert_eq!(language_from_path(Path::new("translations/scantailor_ru.ts")).as_deref(), Some("ru"));
/// assert_eq!(language_from_path(Path::new("scantailor_pt_BR.ts")).as_deref(), Some("pt_BR"));
/// assert_eq!(language_from_path(Path::new("de.ts")).as_deref(), Some("de"));
/// ```
pub fn language_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let parts: Vec<&str> = stem.split('_').collect();
    let language = match parts.as_slice() {
        [] => return None,
        [single] => (*single).to_string(),
        [.., language, region] if is_region(region) => format!("{language}_{region}"),
        [.., last] => (*last).to_string(),
    };
    (!language.is_empty()).then_some(language)
}

fn is_region(part: &str) -> bool {
    part.len() == 2 && part.chars().all(|c| c.is_ascii_uppercase())
}
