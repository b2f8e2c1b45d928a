use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{Catalog, Message, Translation, TranslationBody};
use crate::lookup::numerus_form_count;
use crate::types::TranslationStatus;

/// What [`Catalog::merge_template`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Messages present in both catalogs, translation kept.
    pub kept: usize,
    /// Messages new in the template, added untranslated.
    pub added: usize,
    /// Retired messages that reappeared in the template.
    pub revived: usize,
    /// Active messages missing from the template, now retired.
    pub retired: usize,
}

impl Catalog {
    /// Update this catalog from a freshly extracted template.
    ///
    /// The template lists every string the application currently uses; its
    /// translations are ignored. Matching messages keep their translation and
    /// take the template's locations, developer comment and numerus flag.
    /// New messages are appended as unfinished. Messages the template no
    /// longer has are marked `vanished`, or `obsolete` in TS 1.x files.
    ///
    /// # Example
    ///
    /// ```
    /// use tscat::{Catalog, Message, Translation, TranslationStatus};
    ///
    /// let mut template = Catalog::new();
    /// template.insert("MainWindow", Message::builder().source("Error").build());
    /// template.insert("MainWindow", Message::builder().source("Warning").build());
    ///
    /// let mut ru = Catalog::with_language("ru");
    /// ru.insert(
    ///     "MainWindow",
    ///     Message::builder().source("Error").translation(Translation::finished("Ошибка")).build(),
    /// );
    /// ru.insert(
    ///     "MainWindow",
    ///     Message::builder().source("Save").translation(Translation::finished("Сохранить")).build(),
    /// );
    ///
    /// let report = ru.merge_template(&template);
    /// assert_eq!((report.kept, report.added, report.retired), (1, 1, 1));
    /// assert_eq!(
    ///     ru.message("MainWindow", "Save", "").unwrap().status(),
    ///     TranslationStatus::Vanished,
    /// );
    /// ```
    pub fn merge_template(&mut self, template: &Catalog) -> MergeReport {
        let mut report = MergeReport::default();
        let mut template_keys: HashSet<(String, String, String)> = HashSet::new();
        let form_count = self
            .language()
            .and_then(numerus_form_count)
            .unwrap_or(1);

        for (template_context, template_message) in template.messages() {
            let context_name = template_context.name();
            let (source, comment) = template_message.key();
            template_keys.insert((context_name.to_string(), source.clone(), comment.clone()));

            let context = self.context_or_insert(context_name);
            match context.get_mut(&source, &comment) {
                Some(existing) => {
                    if refresh_from_template(existing, template_message) {
                        report.revived += 1;
                    } else {
                        report.kept += 1;
                    }
                }
                None => {
                    context.insert(untranslated_copy(template_message, form_count));
                    report.added += 1;
                }
            }
        }

        let retired_status = if self.is_legacy_format() {
            TranslationStatus::Obsolete
        } else {
            TranslationStatus::Vanished
        };
        for context in self.contexts_mut() {
            let context_name = context.name().to_string();
            for message in context.messages_mut() {
                let (source, comment) = message.key();
                if template_keys.contains(&(context_name.clone(), source, comment)) {
                    continue;
                }
                if message.status().is_active() {
                    message.translation.status = retired_status;
                    message.locations.clear();
                    report.retired += 1;
                }
            }
        }

        tracing::debug!(
            kept = report.kept,
            added = report.added,
            revived = report.revived,
            retired = report.retired,
            "merged template"
        );
        report
    }
}

/// Refresh template-owned fields. Returns true if the message was revived.
fn refresh_from_template(existing: &mut Message, template: &Message) -> bool {
    existing.locations = template.locations.clone();
    existing.extra_comment = template.extra_comment.clone();

    if existing.numerus != template.numerus {
        existing.numerus = template.numerus;
        existing.translation.body = reshape_body(&existing.translation.body, template.numerus);
        existing.translation.status = TranslationStatus::Unfinished;
    }

    if existing.status().is_retired() {
        existing.translation.status = TranslationStatus::Unfinished;
        return true;
    }
    false
}

/// Convert between single and numerus bodies, keeping the first text.
fn reshape_body(body: &TranslationBody, numerus: bool) -> TranslationBody {
    let first = match body {
        TranslationBody::Text(text) => text.clone(),
        TranslationBody::Numerus(forms) | TranslationBody::LengthVariants(forms) => {
            forms.first().cloned().unwrap_or_default()
        }
    };
    if numerus {
        TranslationBody::Numerus(vec![first])
    } else {
        TranslationBody::Text(first)
    }
}

fn untranslated_copy(template: &Message, form_count: usize) -> Message {
    let mut message = template.clone();
    message.translation = if template.numerus {
        Translation::numerus(
            TranslationStatus::Unfinished,
            vec![String::new(); form_count],
        )
    } else {
        Translation::unfinished("")
    };
    message.translator_comment = None;
    message.old_source = None;
    message.old_comment = None;
    message
}
