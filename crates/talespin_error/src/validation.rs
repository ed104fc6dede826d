//! Input validation error types.

/// Kinds of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// An answer was submitted with no content after trimming whitespace
    #[display("Answer text is empty")]
    BlankAnswer,
    /// A title or field exceeded an allowed bound
    #[display("Invalid field '{}': {}", field, reason)]
    InvalidField {
        /// The field name
        field: String,
        /// Reason the value was rejected
        reason: String,
    },
}

/// Validation error with location tracking.
///
/// Validation errors are recovered locally: the session state is left
/// unchanged and the caller may re-prompt.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for the blank answer rejection.
    #[track_caller]
    pub fn blank_answer() -> Self {
        Self::new(ValidationErrorKind::BlankAnswer)
    }
}
