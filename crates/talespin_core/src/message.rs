//! Message types for the interview transcript.

use crate::{Role, Speaker};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique message identifier, stable within one interview session.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct MessageId(String);

impl MessageId {
    /// Create a message id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of one logical turn, shared by a question and its answer.
///
/// Adjacent-index pairing of question and answer entries corrupts silently
/// if an implementation ever interleaves appends; the explicit turn link
/// replaces it.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct TurnId(u32);

impl TurnId {
    /// Create a turn id.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// The turn id that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// The underlying turn number.
    pub fn value(self) -> u32 {
        self.0
    }
}

/// One entry in the interview transcript.
///
/// Questions are created pre-answered (they need no further input);
/// answers start unanswered with empty text and are resolved when the
/// user submits.
///
/// # Examples
///
/// ```
/// use talespin_core::{Message, MessageId, Role, Speaker, TurnId};
///
/// let question = Message::question(
///     MessageId::new("1"),
///     TurnId::new(0),
///     "What is this story about?",
/// );
/// assert_eq!(question.role, Role::Question);
/// assert!(question.answered);
///
/// let answer = Message::answer_slot(
///     MessageId::new("2"),
///     TurnId::new(0),
///     Speaker::User("uid-123".to_string()),
/// );
/// assert!(!answer.answered);
/// assert!(answer.text.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique id within the session
    pub id: MessageId,
    /// The logical turn this message belongs to
    pub turn: TurnId,
    /// Free-form content; empty means "not yet answered" for answers
    pub text: String,
    /// Question or answer
    pub role: Role,
    /// Author of the message
    pub speaker: Speaker,
    /// True once the message is finalized
    pub answered: bool,
    /// Creation time, monotonically non-decreasing across the transcript
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a question message authored by the assistant.
    pub fn question(id: MessageId, turn: TurnId, text: impl Into<String>) -> Self {
        Self {
            id,
            turn,
            text: text.into(),
            role: Role::Question,
            speaker: Speaker::Bot,
            answered: true,
            created_at: Utc::now(),
        }
    }

    /// Create an empty, unanswered answer slot for the given user.
    pub fn answer_slot(id: MessageId, turn: TurnId, speaker: Speaker) -> Self {
        Self {
            id,
            turn,
            text: String::new(),
            role: Role::Answer,
            speaker,
            answered: false,
            created_at: Utc::now(),
        }
    }

    /// True for answers that have been resolved with non-empty text.
    pub fn is_resolved(&self) -> bool {
        self.answered && !self.text.trim().is_empty()
    }
}
