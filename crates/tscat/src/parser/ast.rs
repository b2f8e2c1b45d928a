//! Parsed form of message text.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A message string split into literal text and placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, adjacent literals merged.
    Literal(String),
    Placeholder(Placeholder),
}

/// A substitution marker inside a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    /// `%1` .. `%99`; `%L1` formats the argument with locale conventions.
    Arg { number: u8, localized: bool },
    /// `%n` / `%Ln`: the count of a numerus message.
    Count { localized: bool },
}

impl Display for Placeholder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let prefix = |localized: bool| if localized { "%L" } else { "%" };
        match self {
            Placeholder::Arg { number, localized } => write!(f, "{}{number}", prefix(*localized)),
            Placeholder::Count { localized } => write!(f, "{}n", prefix(*localized)),
        }
    }
}
