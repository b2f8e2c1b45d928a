use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The state of a translation, as recorded by the `type` attribute of
/// `<translation>`.
///
/// A translation without a `type` attribute is finished. `Obsolete` and
/// `Vanished` both mean the source string is no longer referenced by the
/// application; TS 1.1 files only know `obsolete`, TS 2.x tooling writes
/// `vanished` for strings that disappeared from the sources.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    #[default]
    Finished,
    Unfinished,
    Obsolete,
    Vanished,
}

impl TranslationStatus {
    /// Parse the value of a `type` attribute. A missing attribute is
    /// `Finished`.
    pub fn from_attribute(value: Option<&str>) -> Result<Self, UnknownStatus> {
        match value {
            None => Ok(Self::Finished),
            Some(value) => value.parse(),
        }
    }

    /// The `type` attribute value to write, if any.
    pub fn as_attribute(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Obsolete => Some("obsolete"),
            Self::Vanished => Some("vanished"),
        }
    }

    /// Whether the source string is still referenced by the application.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Finished | Self::Unfinished)
    }

    /// Whether a translator marked the translation as done.
    pub fn is_finished(self) -> bool {
        self == Self::Finished
    }

    /// Whether the message was removed from the application sources.
    pub fn is_retired(self) -> bool {
        !self.is_active()
    }
}

/// A `type` attribute value that is not a known translation status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown translation type '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for TranslationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "finished" => Ok(Self::Finished),
            "unfinished" => Ok(Self::Unfinished),
            "obsolete" => Ok(Self::Obsolete),
            "vanished" => Ok(Self::Vanished),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl Display for TranslationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.pad(match self {
            Self::Finished => "finished",
            Self::Unfinished => "unfinished",
            Self::Obsolete => "obsolete",
            Self::Vanished => "vanished",
        })
    }
}
