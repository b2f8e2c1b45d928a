//! TS file reading and writing, and message text parsing.
//!
//! [`read_catalog`] turns a `.ts` document into a [`Catalog`] plus any
//! non-fatal [`LoadWarning`]s; [`write_catalog`] serializes it back in the
//! layout Qt's own tools use. [`parse_message_text`] splits a source or
//! translation string into literal text and `%1`-style placeholders.
//!
//! [`Catalog`]: crate::Catalog

pub mod ast;
mod error;
mod placeholder;
mod reader;
mod writer;

pub use ast::{Placeholder, Segment};
pub use error::{LoadWarning, ParseError, WriteError};
pub use placeholder::{arg_counts, parse_message_text, parse_placeholders};
pub use reader::{ParseOutput, read_catalog};
pub use writer::write_catalog;
