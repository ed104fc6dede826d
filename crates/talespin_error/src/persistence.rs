//! Persistence error types.

/// Kinds of persistence errors.
///
/// Persisting a transcript writes a conversation document, its child
/// message documents, and a story document. A failure at any step aborts
/// the remaining steps; documents already written are not rolled back, so
/// the kinds below carry enough context for an external sweeper to find
/// orphans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PersistenceErrorKind {
    /// Creating the conversation document failed
    #[display("Failed to create conversation: {}", _0)]
    Conversation(String),
    /// One or more child message writes failed
    #[display("Failed to write messages for conversation {}: {}", conversation_id, reason)]
    MessageWrite {
        /// Conversation the messages belong to
        conversation_id: String,
        /// Underlying failure
        reason: String,
    },
    /// Creating the story document failed, leaving an orphaned conversation
    #[display("Failed to create story for conversation {}: {}", conversation_id, reason)]
    Story {
        /// Conversation already written
        conversation_id: String,
        /// Underlying failure
        reason: String,
    },
    /// Reading persisted documents back failed
    #[display("Failed to read conversation {}: {}", conversation_id, reason)]
    Read {
        /// Conversation being read
        conversation_id: String,
        /// Underlying failure
        reason: String,
    },
    /// The storage backend is unavailable
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
}

/// Persistence error with location tracking.
///
/// # Examples
///
/// ```
/// use talespin_error::{PersistenceError, PersistenceErrorKind};
///
/// let err = PersistenceError::new(PersistenceErrorKind::Unavailable("offline".to_string()));
/// assert!(format!("{}", err).contains("unavailable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Persistence Error: {} at line {} in {}", kind, line, file)]
pub struct PersistenceError {
    /// The kind of error that occurred
    pub kind: PersistenceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PersistenceError {
    /// Create a new persistence error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
