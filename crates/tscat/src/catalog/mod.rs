//! In-memory model of a TS catalog.
//!
//! A [`Catalog`] is one locale's file: an ordered list of [`Context`] blocks,
//! each holding ordered [`Message`] entries. The model keeps everything the
//! file format can express so that reading and writing a catalog is
//! lossless for messages, attributes and locations.

mod context;
mod document;
mod merge;
mod message;
mod stats;

pub use context::Context;
pub use document::{Catalog, LookupPolicy};
pub use merge::MergeReport;
pub use message::{Extra, Location, Message, Translation, TranslationBody, Utf8};
pub use stats::CatalogStats;
