//! Looking translations up across catalogs.
//!
//! [`CatalogSet`] keeps one catalog per language and answers
//! `(language, context, source)` queries the way an application's
//! localization loader would. The helpers here resolve numerus forms and
//! substitute `%1`-style arguments into the result.

mod error;
mod format;
mod plural;
mod set;
mod suggest;

pub use error::{LoadError, LookupError};
pub use format::{format_args, format_count};
pub use plural::{
    category_str, is_supported_language, numerus_categories, numerus_form_count,
    numerus_form_index,
};
pub use set::{CatalogSet, language_from_path};
pub use suggest::compute_suggestions;
