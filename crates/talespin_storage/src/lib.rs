//! Transcript persistence for Talespin.
//!
//! Converts a finished interview transcript into its durable
//! representation: one conversation document, ordered child message
//! documents, and one story record, written as a single logical
//! operation through the [`talespin_interface::DocumentStore`] seam.
//!
//! Document field names match the production readers exactly
//! (`conversation_start_date`, `message_time`, `speech`, ...); changing
//! them breaks the story detail screens that consume this data.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod archiver;
mod documents;
mod memory;

pub use archiver::StoryArchiver;
pub use documents::{ConversationDoc, MessageDoc, PersistReceipt, StoryDoc};
pub use memory::MemoryStore;
