use std::collections::HashMap;
use std::mem;
use std::slice::IterMut;

use crate::catalog::{Message, Translation};

/// The messages of one UI class or dialog, e.g. `MainWindow` or
/// `output::Filter`.
///
/// Messages keep document order. Within a context a message is identified by
/// its source text and disambiguation comment; inserting a second message
/// with the same key replaces the first one in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    name: String,
    comment: Option<String>,
    encoding: Option<String>,
    messages: Vec<Message>,
    /// (source, comment) -> position in `messages`.
    index: HashMap<(String, String), usize>,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Legacy context-level comment.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    /// Legacy `encoding` attribute.
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn set_encoding(&mut self, encoding: Option<String>) {
        self.encoding = encoding;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Insert a message, returning the message it replaced if the key was
    /// already present.
    pub fn insert(&mut self, message: Message) -> Option<Message> {
        let key = message.key();
        match self.index.get(&key) {
            Some(&position) => Some(mem::replace(&mut self.messages[position], message)),
            None => {
                self.index.insert(key, self.messages.len());
                self.messages.push(message);
                None
            }
        }
    }

    /// Find a message by source text and disambiguation comment. An empty
    /// comment matches a message without one.
    pub fn get(&self, source: &str, comment: &str) -> Option<&Message> {
        self.index
            .get(&(source.to_string(), comment.to_string()))
            .map(|&position| &self.messages[position])
    }

    /// Replace the translation of one message, returning the previous one.
    /// Returns `None` when no message has this key.
    pub fn set_translation(
        &mut self,
        source: &str,
        comment: &str,
        translation: Translation,
    ) -> Option<Translation> {
        let message = self.get_mut(source, comment)?;
        Some(mem::replace(&mut message.translation, translation))
    }

    /// Mutable access to one message. Callers must leave `source` and
    /// `comment` untouched.
    pub(crate) fn get_mut(&mut self, source: &str, comment: &str) -> Option<&mut Message> {
        let position = *self.index.get(&(source.to_string(), comment.to_string()))?;
        Some(&mut self.messages[position])
    }

    /// Keep only the messages for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Message) -> bool) {
        self.messages.retain(keep);
        self.reindex();
    }

    /// Source texts of every message, for suggestions.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(|message| message.source.as_str())
    }

    /// Mutable iteration that cannot change keys from outside the crate.
    pub(crate) fn messages_mut(&mut self) -> IterMut<'_, Message> {
        self.messages.iter_mut()
    }

    fn reindex(&mut self) {
        self.index = self
            .messages
            .iter()
            .enumerate()
            .map(|(position, message)| (message.key(), position))
            .collect();
    }
}
