//! Persisted document shapes.
//!
//! Field names are wire-compatible with the existing document readers
//! and must not be renamed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use talespin_core::Role;

/// Collection name for conversation documents.
pub(crate) const CONVERSATIONS: &str = "conversations";
/// Collection name for story documents.
pub(crate) const STORIES: &str = "stories";
/// Default story title when the user leaves the field blank.
pub(crate) const DEFAULT_TITLE: &str = "Untitled Story";

/// The conversation document heading one persisted transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationDoc {
    /// When the interview was persisted
    pub conversation_start_date: DateTime<Utc>,
    /// Participant identities: the owner and the assistant
    pub participants: Vec<String>,
}

impl ConversationDoc {
    /// Create a conversation document for the given owner.
    pub fn new(owner: &str) -> Self {
        Self {
            conversation_start_date: Utc::now(),
            participants: vec![owner.to_string(), "bot".to_string()],
        }
    }
}

/// One persisted message under a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDoc {
    /// ISO-8601 timestamp used for ordering on read
    pub message_time: String,
    /// "bot" or "user"
    pub speaker: String,
    /// The message text
    pub speech: String,
}

impl MessageDoc {
    /// The interview role this persisted message maps back to.
    ///
    /// Existing readers reconstruct the question/answer split from the
    /// speaker tag alone.
    pub fn role(&self) -> Role {
        if self.speaker == "bot" {
            Role::Question
        } else {
            Role::Answer
        }
    }
}

/// The story record referencing a persisted conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryDoc {
    /// Foreign key to the conversation document
    pub conversation_id: String,
    /// Owning user's identity
    pub owner: String,
    /// Users with access to this story
    pub related_users: Vec<String>,
    /// Completion progress (0-100), advanced by the external
    /// post-processing pipeline
    pub processing: u8,
    /// Story title
    pub title: String,
    /// Set by the pipeline once the story text is generated
    pub story_generated_date: String,
    /// Set once the user has listened to the narration
    pub story_recited_date: String,
}

impl StoryDoc {
    /// Create a story record at its zero/empty defaults.
    ///
    /// A blank or whitespace title falls back to "Untitled Story".
    pub fn new(conversation_id: &str, owner: &str, title: &str) -> Self {
        let title = if title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title.to_string()
        };
        Self {
            conversation_id: conversation_id.to_string(),
            owner: owner.to_string(),
            related_users: vec![owner.to_string(), "bot".to_string()],
            processing: 0,
            title,
            story_generated_date: String::new(),
            story_recited_date: String::new(),
        }
    }
}

/// Identifiers returned by a successful persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PersistReceipt {
    /// Id of the conversation document
    conversation_id: String,
    /// Id of the story document
    story_id: String,
    /// Number of messages actually persisted
    message_count: usize,
}

impl PersistReceipt {
    /// Create a receipt.
    pub fn new(conversation_id: String, story_id: String, message_count: usize) -> Self {
        Self {
            conversation_id,
            story_id,
            message_count,
        }
    }
}
