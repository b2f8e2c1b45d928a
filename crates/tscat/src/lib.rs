//! Tooling for Qt Linguist translation source (`.ts`) catalogs.
//!
//! A [`Catalog`] holds one locale's contexts and messages. Catalogs are read
//! and written by [`parser`], checked by [`lint`], queried through
//! [`Catalog::translate`] or a multi-language [`CatalogSet`], and updated from
//! freshly extracted templates with [`Catalog::merge_template`].
//!
//! ```
//! use tscat::parser::read_catalog;
//!
//! let output = read_catalog(r#"<?xml version="1.0" encoding="utf-8"?>
//! <!DOCTYPE TS>
//! <TS version="2.1" language="ru">
//! <context>
//!     <name>MainWindow</name>
//!     <message>
//!         <source>Error</source>
//!         <translation>Ошибка</translation>
//!     </message>
//! </context>
//! </TS>"#).unwrap();
//!
//! assert_eq!(output.catalog.translate("MainWindow", "Error"), Some("Ошибка"));
//! ```

pub mod catalog;
pub mod lint;
pub mod lookup;
pub mod parser;
pub mod types;

pub use catalog::{
    Catalog, CatalogStats, Context, Extra, Location, LookupPolicy, MergeReport, Message,
    Translation, TranslationBody, Utf8,
};
pub use lint::{LintConfig, LintRule, LintWarning, lint_catalog};
pub use lookup::{CatalogSet, LoadError, LookupError, compute_suggestions};
pub use parser::{LoadWarning, ParseError, ParseOutput, WriteError, read_catalog, write_catalog};
pub use types::{MessageId, TranslationStatus};
