//! Talespin: a guided story interview engine.
//!
//! Users answer a scripted sequence of questions; once the script is
//! exhausted, an AI generator asks follow-ups built from their prior
//! answers, retrying rate limits with exponential backoff and degrading
//! to a fixed fallback question when the service stays unreachable. On
//! finalize the transcript is persisted as a conversation, its ordered
//! messages, and a story record.
//!
//! This crate is a facade over the workspace:
//!
//! - [`talespin_core`] - message, role, and request/config types
//! - [`talespin_error`] - the error hierarchy
//! - [`talespin_interface`] - the `QuestionGenerator` and `DocumentStore` traits
//! - [`talespin_models`] - the OpenAI chat-completions client
//! - [`talespin_retry`] - backoff, single-flight, and fallback handling
//! - [`talespin_interview`] - the interview state machine
//! - [`talespin_storage`] - transcript serialization and stores
//!
//! # Example
//!
//! ```no_run
//! use talespin::{
//!     InterviewSession, MemoryStore, OpenAiClient, QuestionSource, RetryingGenerator,
//!     ScriptedQuestions, StoryArchiver, TalespinResult,
//! };
//!
//! # async fn run() -> TalespinResult<()> {
//! let generator = RetryingGenerator::new(OpenAiClient::from_env()?);
//! let source = QuestionSource::new(ScriptedQuestions::default(), generator);
//! let archiver = StoryArchiver::new(MemoryStore::new());
//!
//! let mut session = InterviewSession::new(source, archiver, "uid-123")?;
//! session.submit_answer("It's about the summer we drove to Lisbon.").await?;
//! let receipt = session.finalize("Lisbon, 2009").await?;
//! println!("persisted {} messages", receipt.message_count());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use talespin_core::{
    ChatMessage, ChatRole, GenerateRequest, GenerateResponse, GenerationConfig, Message,
    MessageId, Role, Speaker, TurnId, init_telemetry,
};
pub use talespin_error::{
    GenerationError, GenerationErrorKind, PersistenceError, PersistenceErrorKind, SessionError,
    SessionErrorKind, TalespinError, TalespinErrorKind, TalespinResult, TranscriptError,
    TranscriptErrorKind, ValidationError, ValidationErrorKind,
};
pub use talespin_interface::{DocumentStore, GenerationStatus, QuestionGenerator, TurnView};
pub use talespin_interview::{
    InterviewMode, InterviewSession, PacingConfig, QuestionSource, ScriptedQuestions, SessionPhase,
    Transcript,
};
pub use talespin_models::OpenAiClient;
pub use talespin_retry::{GeneratedQuestion, RetryPolicy, RetryingGenerator};
pub use talespin_storage::{
    ConversationDoc, MemoryStore, MessageDoc, PersistReceipt, StoryArchiver, StoryDoc,
};
