//! Question generation error types and retry classification.

/// Kinds of question generation errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key not configured
    #[display("Generation API key not configured")]
    MissingApiKey,
    /// The service rejected the request for exceeding its rate limit
    #[display("Rate limited by generation service")]
    RateLimited,
    /// The service returned a non-success status
    #[display("Generation API returned HTTP {}: {}", status, message)]
    ApiStatus {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },
    /// The request never reached the service (timeout, DNS, connection)
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// The response body could not be decoded
    #[display("Failed to parse generation response: {}", _0)]
    Parse(String),
    /// The response contained no completion text
    #[display("Generation response was empty")]
    EmptyCompletion,
    /// A generation call is already in flight for this session
    #[display("A generation request is already in flight")]
    InFlight,
}

impl GenerationErrorKind {
    /// Check whether this error should be retried with backoff.
    ///
    /// Only rate limiting is retryable; every other failure is terminal
    /// for the attempt and degrades to the fallback question.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerationErrorKind::RateLimited)
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use talespin_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::RateLimited);
/// assert!(err.kind.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Check whether this error should be retried with backoff.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
