//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, GenerationError, JsonError, PersistenceError, SessionError,
    TranscriptError, ValidationError,
};

/// This is the foundation error enum for the Talespin workspace.
///
/// # Examples
///
/// ```
/// use talespin_error::{TalespinError, ConfigError};
///
/// let config_err = ConfigError::new("missing model id");
/// let err: TalespinError = config_err.into();
/// assert!(format!("{}", err).contains("Config Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TalespinErrorKind {
    /// Transcript invariant violation
    #[from(TranscriptError)]
    Transcript(TranscriptError),
    /// Input validation failure
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Question generation failure
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Persistence failure
    #[from(PersistenceError)]
    Persistence(PersistenceError),
    /// Session lifecycle violation
    #[from(SessionError)]
    Session(SessionError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Talespin error with kind discrimination.
///
/// # Examples
///
/// ```
/// use talespin_error::{TalespinResult, ValidationError};
///
/// fn might_fail() -> TalespinResult<()> {
///     Err(ValidationError::blank_answer())?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Talespin Error: {}", _0)]
pub struct TalespinError(Box<TalespinErrorKind>);

impl TalespinError {
    /// Create a new error from a kind.
    pub fn new(kind: TalespinErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TalespinErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TalespinErrorKind
impl<T> From<T> for TalespinError
where
    T: Into<TalespinErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Talespin operations.
///
/// # Examples
///
/// ```
/// use talespin_error::{TalespinResult, ConfigError};
///
/// fn load() -> TalespinResult<String> {
///     Err(ConfigError::new("no such profile"))?
/// }
/// ```
pub type TalespinResult<T> = std::result::Result<T, TalespinError>;
