use std::fmt::{Display, Formatter, Result as FmtResult};

use const_fnv1a_hash::fnv1a_hash_str_64;
use serde::{Deserialize, Serialize};

/// Separator between key components. Never appears in well-formed XML text.
const KEY_SEPARATOR: char = '\u{4}';

/// A compact, serializable identifier for a catalog message.
///
/// `MessageId` wraps a 64-bit FNV-1a hash of the message's lookup key: the
/// context name, the source text and the disambiguation comment. The same key
/// always produces the same id, across catalogs and across runs, so ids can be
/// used to line up one message in several locales.
///
/// # Example
///
/// ```
/// use tscat::MessageId;
///
/// let a = MessageId::from_key("MainWindow", "Error", "");
/// let b = MessageId::from_key("MainWindow", "Error", "");
/// let c = MessageId::from_key("MainWindow", "Error", "dialog title");
///
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// ```
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct MessageId(u64);

impl MessageId {
    /// Create a MessageId from a message key.
    pub fn from_key(context: &str, source: &str, comment: &str) -> Self {
        let mut key = String::with_capacity(context.len() + source.len() + comment.len() + 2);
        key.push_str(context);
        key.push(KEY_SEPARATOR);
        key.push_str(source);
        key.push(KEY_SEPARATOR);
        key.push_str(comment);
        Self(fnv1a_hash_str_64(&key))
    }

    /// Get the raw hash value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "MessageId({:016x})", self.0)
    }
}
