//! Consistency checks for TS catalogs.
//!
//! The rules look at message data only; nothing is evaluated. Every finding
//! is a [`LintWarning`]: catalogs with warnings are still usable.

mod config;
mod rules;
mod warning;

pub use config::{LintConfig, LintRule};
pub use rules::{is_layout_placeholder, lint_catalog};
pub use warning::LintWarning;
