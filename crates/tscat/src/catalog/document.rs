use std::collections::HashMap;

use bon::Builder;

use crate::catalog::{CatalogStats, Context, Extra, Message, TranslationBody};
use crate::lookup::{format_count, numerus_form_index};
use crate::types::TranslationStatus;

/// Version written for catalogs created from scratch.
pub const DEFAULT_VERSION: &str = "2.1";

/// Controls which translations [`Catalog::translate_with`] returns.
///
/// Obsolete and vanished translations are never returned, and neither are
/// empty ones; the caller is expected to fall back to the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct LookupPolicy {
    /// Return translations marked `unfinished`. On by default, matching what
    /// `lrelease` does unless told `-nounfinished`.
    #[builder(default = true)]
    pub include_unfinished: bool,
}

impl Default for LookupPolicy {
    fn default() -> Self {
        LookupPolicy::builder().build()
    }
}

impl LookupPolicy {
    fn accepts(&self, status: TranslationStatus) -> bool {
        match status {
            TranslationStatus::Finished => true,
            TranslationStatus::Unfinished => self.include_unfinished,
            TranslationStatus::Obsolete | TranslationStatus::Vanished => false,
        }
    }
}

/// One locale's translation catalog.
///
/// # Example
///
/// ```
/// use tscat::{Catalog, Message, Translation};
///
/// let mut catalog = Catalog::with_language("bg");
/// catalog.insert(
///     "CrashReportDialog",
///     Message::builder()
///         .source("Dump file")
///         .translation(Translation::finished("Дъмп-файл"))
///         .build(),
/// );
///
/// assert_eq!(catalog.translate("CrashReportDialog", "Dump file"), Some("Дъмп-файл"));
/// assert_eq!(catalog.translate("CrashReportDialog", "Send"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    version: Option<String>,
    language: Option<String>,
    source_language: Option<String>,
    default_codec: Option<String>,
    /// Catalog names from `<dependencies>`.
    dependencies: Vec<String>,
    extras: Vec<Extra>,
    contexts: Vec<Context>,
    /// Context name -> position in `contexts`.
    index: HashMap<String, usize>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// An empty catalog in the current file format version.
    pub fn new() -> Self {
        Self {
            version: Some(DEFAULT_VERSION.to_string()),
            language: None,
            source_language: None,
            default_codec: None,
            dependencies: Vec::new(),
            extras: Vec::new(),
            contexts: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// An empty catalog for `language`.
    pub fn with_language(language: impl Into<String>) -> Self {
        let mut catalog = Self::new();
        catalog.language = Some(language.into());
        catalog
    }

    // =========================================================================
    // Header
    // =========================================================================

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(&mut self, version: Option<String>) {
        self.version = version;
    }

    /// Whether the file uses the TS 1.x format, which predates `vanished`.
    pub fn is_legacy_format(&self) -> bool {
        self.version
            .as_deref()
            .is_some_and(|version| version.starts_with("1."))
    }

    /// The target language, e.g. `ru` or `pt_BR`.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.language = language;
    }

    pub fn source_language(&self) -> Option<&str> {
        self.source_language.as_deref()
    }

    pub fn set_source_language(&mut self, language: Option<String>) {
        self.source_language = language;
    }

    /// Legacy `<defaultcodec>` content.
    pub fn default_codec(&self) -> Option<&str> {
        self.default_codec.as_deref()
    }

    pub fn set_default_codec(&mut self, codec: Option<String>) {
        self.default_codec = codec;
    }

    /// File-level `extra-*` elements.
    /// Catalogs this one was split from or depends on, in document order.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn push_dependency(&mut self, catalog: impl Into<String>) {
        self.dependencies.push(catalog.into());
    }

    pub fn extras(&self) -> &[Extra] {
        &self.extras
    }

    pub fn push_extra(&mut self, extra: Extra) {
        self.extras.push(extra);
    }

    // =========================================================================
    // Contexts and messages
    // =========================================================================

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.index.get(name).map(|&position| &self.contexts[position])
    }

    pub fn context_mut(&mut self, name: &str) -> Option<&mut Context> {
        let position = *self.index.get(name)?;
        Some(&mut self.contexts[position])
    }

    /// Get a context by name, appending an empty one if it does not exist.
    pub fn context_or_insert(&mut self, name: &str) -> &mut Context {
        let position = match self.index.get(name) {
            Some(&position) => position,
            None => {
                self.index.insert(name.to_string(), self.contexts.len());
                self.contexts.push(Context::new(name));
                self.contexts.len() - 1
            }
        };
        &mut self.contexts[position]
    }

    /// Insert a message into `context`, creating the context if needed.
    ///
    /// Returns the message that was replaced when the key already existed.
    pub fn insert(&mut self, context: &str, message: Message) -> Option<Message> {
        self.context_or_insert(context).insert(message)
    }

    /// Find a message by its full key.
    pub fn message(&self, context: &str, source: &str, comment: &str) -> Option<&Message> {
        self.context(context)?.get(source, comment)
    }

    /// Every message together with its context, in document order.
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts.iter().flat_map(|context| {
            context
                .messages()
                .iter()
                .map(move |message| (context, message))
        })
    }

    /// Total number of messages across all contexts.
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(Context::len).sum()
    }

    pub(crate) fn contexts_mut(&mut self) -> impl Iterator<Item = &mut Context> {
        self.contexts.iter_mut()
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Translate `source` in `context` with the default [`LookupPolicy`].
    pub fn translate(&self, context: &str, source: &str) -> Option<&str> {
        self.translate_with(LookupPolicy::default(), context, source, "")
    }

    /// Translate a message identified by its full key.
    ///
    /// Returns `None` when the message is missing, retired, excluded by the
    /// policy, empty, or a numerus message (use [`Catalog::translate_plural`]).
    pub fn translate_with(
        &self,
        policy: LookupPolicy,
        context: &str,
        source: &str,
        comment: &str,
    ) -> Option<&str> {
        let message = self.message(context, source, comment)?;
        if !policy.accepts(message.status()) {
            return None;
        }
        message.translation.text().filter(|text| !text.is_empty())
    }

    /// Translate a numerus message for the count `n`, substituting `%n`.
    ///
    /// The form is chosen with the plural rules of the catalog language. If
    /// the language has no plural data the first form is used.
    pub fn translate_plural(&self, context: &str, source: &str, n: i64) -> Option<String> {
        self.translate_plural_with(LookupPolicy::default(), context, source, "", n)
    }

    /// [`Catalog::translate_plural`] for a full message key and policy.
    pub fn translate_plural_with(
        &self,
        policy: LookupPolicy,
        context: &str,
        source: &str,
        comment: &str,
        n: i64,
    ) -> Option<String> {
        let message = self.message(context, source, comment)?;
        if !policy.accepts(message.status()) {
            return None;
        }
        let form = match &message.translation.body {
            TranslationBody::Numerus(forms) => {
                let position = self
                    .language()
                    .and_then(|language| numerus_form_index(language, n))
                    .unwrap_or(0);
                forms.get(position).or_else(|| forms.last())?
            }
            TranslationBody::Text(text) => text,
            TranslationBody::LengthVariants(variants) => variants.first()?,
        };
        if form.is_empty() {
            return None;
        }
        Some(format_count(form, n))
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Count messages by status.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats::from_catalog(self)
    }

    /// Drop obsolete and vanished messages, then any context left empty.
    ///
    /// Returns the number of messages removed.
    pub fn purge_obsolete(&mut self) -> usize {
        let before = self.message_count();
        for context in &mut self.contexts {
            context.retain(|message| message.status().is_active());
        }
        self.contexts.retain(|context| !context.is_empty());
        self.reindex();
        let removed = before - self.message_count();
        tracing::debug!(removed, "purged retired messages");
        removed
    }

    /// Remove line numbers from every location, keeping file names.
    pub fn strip_line_numbers(&mut self) {
        for context in &mut self.contexts {
            for message in context.messages_mut() {
                for location in &mut message.locations {
                    location.line = None;
                }
            }
        }
    }

    fn reindex(&mut self) {
        self.index = self
            .contexts
            .iter()
            .enumerate()
            .map(|(position, context)| (context.name().to_string(), position))
            .collect();
    }
}
