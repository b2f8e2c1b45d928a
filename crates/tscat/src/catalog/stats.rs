use serde::Serialize;

use crate::catalog::Catalog;
use crate::types::TranslationStatus;

/// Message counts for one catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub finished: usize,
    pub unfinished: usize,
    pub obsolete: usize,
    pub vanished: usize,
    /// Active messages (finished or unfinished) with no translated text.
    pub empty: usize,
    /// Finished messages that carry text.
    pub translated: usize,
    pub numerus: usize,
}

impl CatalogStats {
    pub(crate) fn from_catalog(catalog: &Catalog) -> Self {
        let mut stats = Self::default();
        for (_, message) in catalog.messages() {
            stats.total += 1;
            if message.numerus {
                stats.numerus += 1;
            }
            let status = message.status();
            match status {
                TranslationStatus::Finished => stats.finished += 1,
                TranslationStatus::Unfinished => stats.unfinished += 1,
                TranslationStatus::Obsolete => stats.obsolete += 1,
                TranslationStatus::Vanished => stats.vanished += 1,
            }
            let empty = message.translation.is_empty();
            if status.is_active() && empty {
                stats.empty += 1;
            }
            if status == TranslationStatus::Finished && !empty {
                stats.translated += 1;
            }
        }
        stats
    }

    /// Messages still referenced by the application.
    pub fn active(&self) -> usize {
        self.finished + self.unfinished
    }

    /// Share of active messages that are translated, in percent.
    pub fn completion(&self) -> f64 {
        let active = self.active();
        if active == 0 {
            return 100.0;
        }
        self.translated as f64 * 100.0 / active as f64
    }

    /// Whether every active message is finished and non-empty.
    pub fn is_complete(&self) -> bool {
        self.unfinished == 0 && self.empty == 0
    }
}
