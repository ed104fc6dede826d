//! Interview session error types.

/// Kinds of session lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SessionErrorKind {
    /// The session was finalized and accepts no further input
    #[display("Session is closed")]
    Closed,
    /// An edit is already open; submit or cancel it first
    #[display("An edit is already in progress")]
    EditInProgress,
    /// Save or cancel was called with no edit open
    #[display("No edit in progress")]
    NoPendingEdit,
    /// The session has no question awaiting an answer
    #[display("No question is awaiting an answer")]
    NoActiveQuestion,
}

/// Session error with location tracking.
///
/// # Examples
///
/// ```
/// use talespin_error::{SessionError, SessionErrorKind};
///
/// let err = SessionError::new(SessionErrorKind::Closed);
/// assert!(format!("{}", err).contains("closed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Session Error: {} at line {} in {}", kind, line, file)]
pub struct SessionError {
    /// The kind of error that occurred
    pub kind: SessionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SessionError {
    /// Create a new session error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
