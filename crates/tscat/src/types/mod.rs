mod message_id;
mod status;

pub use message_id::MessageId;
pub use status::{TranslationStatus, UnknownStatus};
