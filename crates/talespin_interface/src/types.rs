//! View types consumed by the UI layer.

use serde::{Deserialize, Serialize};
use talespin_core::{Message, TurnId};

/// Loading state of the question generation pipeline.
///
/// The UI renders a spinner while `Waiting` and a retry notice while
/// `Retrying`; input stays enabled either way since generation failures
/// degrade to an in-conversation fallback question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum GenerationStatus {
    /// No generation call outstanding
    Idle,
    /// First attempt in flight
    Waiting,
    /// Backing off after rate limiting; carries the attempt number
    #[display("Retrying (attempt {})", _0)]
    Retrying(u32),
}

impl GenerationStatus {
    /// True while any generation call is outstanding.
    pub fn is_busy(&self) -> bool {
        !matches!(self, GenerationStatus::Idle)
    }
}

/// One question/answer pair as presented to the UI.
///
/// # Examples
///
/// ```
/// use talespin_core::{Message, MessageId, Speaker, TurnId};
/// use talespin_interface::TurnView;
///
/// let question = Message::question(MessageId::new("1"), TurnId::new(0), "Who?");
/// let answer = Message::answer_slot(
///     MessageId::new("2"),
///     TurnId::new(0),
///     Speaker::User("u1".to_string()),
/// );
/// let view = TurnView::new(question, Some(answer));
/// assert!(!view.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnView {
    /// The question presented to the user
    pub question: Message,
    /// The answer slot, if one has been appended for this turn
    pub answer: Option<Message>,
}

impl TurnView {
    /// Create a view over one turn.
    pub fn new(question: Message, answer: Option<Message>) -> Self {
        Self { question, answer }
    }

    /// The turn this view covers.
    pub fn turn(&self) -> TurnId {
        self.question.turn
    }

    /// True once the turn's answer has been resolved.
    pub fn is_complete(&self) -> bool {
        self.answer.as_ref().is_some_and(|a| a.is_resolved())
    }
}
