//! Transcript error types.

/// Kinds of transcript errors.
///
/// Transcript operations are infallible in the happy path; these kinds
/// signal invariant violations in the calling code rather than recoverable
/// runtime conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TranscriptErrorKind {
    /// A message with this id was already appended
    #[display("Duplicate message id: {}", _0)]
    DuplicateId(String),
    /// No message with the given id exists
    #[display("Message not found: {}", _0)]
    NotFound(String),
    /// The target message is a question and cannot take an answer
    #[display("Message {} is a question, not an answer slot", _0)]
    NotAnAnswer(String),
}

/// Transcript error with location tracking.
///
/// # Examples
///
/// ```
/// use talespin_error::{TranscriptError, TranscriptErrorKind};
///
/// let err = TranscriptError::new(TranscriptErrorKind::NotFound("7".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transcript Error: {} at line {} in {}", kind, line, file)]
pub struct TranscriptError {
    /// The kind of error that occurred
    pub kind: TranscriptErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TranscriptError {
    /// Create a new transcript error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TranscriptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
