use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use bon::Builder;

use crate::types::{MessageId, TranslationStatus};

/// Where a message was found in the application sources.
///
/// Locations are advisory: extraction tooling rewrites them on every run and
/// they are frequently stale. The line is kept verbatim because TS 2.1 files
/// may record it relative to the previous location (`+3`, `-12`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub filename: Option<String>,
    pub line: Option<String>,
}

impl Location {
    /// Create a location with an absolute line number.
    pub fn new(filename: impl Into<String>, line: u32) -> Self {
        Self {
            filename: Some(filename.into()),
            line: Some(line.to_string()),
        }
    }

    /// The line as a number. Relative lines keep their sign.
    pub fn line_number(&self) -> Option<i64> {
        self.line.as_deref().and_then(|line| line.parse().ok())
    }

    /// Whether the line is recorded relative to the previous location.
    pub fn is_relative(&self) -> bool {
        self.line
            .as_deref()
            .is_some_and(|line| line.starts_with('+') || line.starts_with('-'))
    }
}

/// The text content of a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationBody {
    /// A plain translation.
    Text(String),
    /// One form per plural category of the target language (`<numerusform>`).
    Numerus(Vec<String>),
    /// Alternatives ordered from longest to shortest (`<lengthvariant>`).
    LengthVariants(Vec<String>),
}

impl Default for TranslationBody {
    fn default() -> Self {
        TranslationBody::Text(String::new())
    }
}

/// A `<translation>` element: status plus body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    pub status: TranslationStatus,
    pub body: TranslationBody,
}

impl Translation {
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            status: TranslationStatus::Finished,
            body: TranslationBody::Text(text.into()),
        }
    }

    pub fn unfinished(text: impl Into<String>) -> Self {
        Self {
            status: TranslationStatus::Unfinished,
            body: TranslationBody::Text(text.into()),
        }
    }

    pub fn numerus(status: TranslationStatus, forms: Vec<String>) -> Self {
        Self {
            status,
            body: TranslationBody::Numerus(forms),
        }
    }

    /// The main text of the translation.
    ///
    /// For length variants this is the first (longest) variant. Numerus
    /// translations have no single text and return `None`.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            TranslationBody::Text(text) => Some(text),
            TranslationBody::LengthVariants(variants) => {
                Some(variants.first().map_or("", String::as_str))
            }
            TranslationBody::Numerus(_) => None,
        }
    }

    /// Every text the translation carries, in document order.
    pub fn forms(&self) -> Vec<&str> {
        match &self.body {
            TranslationBody::Text(text) => vec![text.as_str()],
            TranslationBody::Numerus(forms) | TranslationBody::LengthVariants(forms) => {
                forms.iter().map(String::as_str).collect()
            }
        }
    }

    /// True when no form carries any text.
    pub fn is_empty(&self) -> bool {
        self.forms().iter().all(|form| form.is_empty())
    }
}

/// The legacy `utf8` attribute on `<message>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Utf8 {
    True,
    False,
    Both,
}

impl Display for Utf8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.pad(match self {
            Self::True => "true",
            Self::False => "false",
            Self::Both => "both",
        })
    }
}

impl FromStr for Utf8 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(Self::True),
            "false" => Ok(Self::False),
            "both" => Ok(Self::Both),
            other => Err(other.to_string()),
        }
    }
}

/// An `extra-*` element, preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extra {
    pub name: String,
    pub content: String,
}

/// One translatable string and everything recorded about it.
///
/// # Example
///
/// ```
/// use tscat::{Location, Message, Translation};
///
/// let message = Message::builder()
///     .source("Dump file")
///     .translation(Translation::finished("Дъмп-файл"))
///     .locations(vec![Location::new("../CrashReportDialog.ui", 42)])
///     .build();
///
/// assert_eq!(message.source, "Dump file");
/// assert_eq!(message.translation.text(), Some("Дъмп-файл"));
/// assert!(!message.numerus);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct Message {
    #[builder(into)]
    pub id: Option<String>,

    /// The original string, verbatim.
    #[builder(into)]
    pub source: String,

    /// Disambiguation comment; part of the lookup key.
    #[builder(into)]
    pub comment: Option<String>,

    #[builder(into)]
    pub old_source: Option<String>,

    #[builder(into)]
    pub old_comment: Option<String>,

    /// Note from the developer to translators.
    #[builder(into)]
    pub extra_comment: Option<String>,

    #[builder(into)]
    pub translator_comment: Option<String>,

    #[builder(default)]
    pub translation: Translation,

    #[builder(default)]
    pub locations: Vec<Location>,

    /// Whether the message has plural forms.
    #[builder(default)]
    pub numerus: bool,

    pub utf8: Option<Utf8>,

    /// Opaque `<userdata>` text some editors attach.
    #[builder(into)]
    pub userdata: Option<String>,

    #[builder(default)]
    pub extras: Vec<Extra>,
}

impl Message {
    /// The disambiguation comment, or an empty string.
    pub fn comment_or_empty(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// The stable id of this message within `context`.
    pub fn id_in(&self, context: &str) -> MessageId {
        MessageId::from_key(context, &self.source, self.comment_or_empty())
    }

    pub fn status(&self) -> TranslationStatus {
        self.translation.status
    }

    pub(crate) fn key(&self) -> (String, String) {
        (self.source.clone(), self.comment_or_empty().to_string())
    }
}
