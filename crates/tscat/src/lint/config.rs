use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Identifies one lint rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LintRule {
    EmptySource,
    EmptyTranslation,
    PlaceholderMismatch,
    NumerusFormCount,
    UnknownLanguage,
}

impl LintRule {
    pub const ALL: [LintRule; 5] = [
        LintRule::EmptySource,
        LintRule::EmptyTranslation,
        LintRule::PlaceholderMismatch,
        LintRule::NumerusFormCount,
        LintRule::UnknownLanguage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LintRule::EmptySource => "empty-source",
            LintRule::EmptyTranslation => "empty-translation",
            LintRule::PlaceholderMismatch => "placeholder-mismatch",
            LintRule::NumerusFormCount => "numerus-form-count",
            LintRule::UnknownLanguage => "unknown-language",
        }
    }
}

impl Display for LintRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.pad(self.name())
    }
}

impl FromStr for LintRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LintRule::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = LintRule::ALL.into_iter().map(LintRule::name).collect();
                format!("unknown lint rule '{s}', expected one of: {}", names.join(", "))
            })
    }
}

/// Lint settings, usually read from a `.tscat.json` file.
///
/// ```
/// use tscat::{LintConfig, LintRule};
///
/// let config: LintConfig = serde_json::from_str(r#"{
///     "disabled": ["numerus-form-count"],
///     "layoutPlaceholders": ["PushButton"]
/// }"#).unwrap();
///
/// assert!(!config.is_enabled(LintRule::NumerusFormCount));
/// assert!(config.is_enabled(LintRule::PlaceholderMismatch));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default, rename_all = "camelCase")]
pub struct LintConfig {
    /// Rules that are not run.
    #[builder(default)]
    pub disabled: Vec<LintRule>,

    /// Extra source strings that may stay untranslated, on top of the
    /// built-in designer defaults.
    #[builder(default)]
    pub layout_placeholders: Vec<String>,
}

impl LintConfig {
    pub fn is_enabled(&self, rule: LintRule) -> bool {
        !self.disabled.contains(&rule)
    }
}
