//! Interview state machine for the Talespin create-story flow.
//!
//! An interview opens on a scripted question list, collects one answer
//! per question, and hands off to a remote generator for follow-up
//! questions once the script is exhausted. The session runs until the
//! user finalizes, at which point the transcript is persisted as a
//! story.
//!
//! # Examples
//!
//! ```no_run
//! use talespin_interview::{InterviewSession, QuestionSource, ScriptedQuestions};
//! use talespin_models::OpenAiClient;
//! use talespin_retry::RetryingGenerator;
//! use talespin_storage::{MemoryStore, StoryArchiver};
//!
//! # async fn run() -> talespin_error::TalespinResult<()> {
//! let generator = RetryingGenerator::new(OpenAiClient::from_env()?);
//! let source = QuestionSource::new(ScriptedQuestions::default(), generator);
//! let archiver = StoryArchiver::new(MemoryStore::new());
//!
//! let mut session = InterviewSession::new(source, archiver, "uid-123")?;
//! session.submit_answer("A summer in Lisbon").await?;
//! session.skip().await?;
//! let receipt = session.finalize("Lisbon").await?;
//! println!("persisted {} messages", receipt.message_count());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod script;
mod session;
mod source;
mod transcript;

pub use script::ScriptedQuestions;
pub use session::{InterviewMode, InterviewSession, PacingConfig, SessionPhase};
pub use source::QuestionSource;
pub use transcript::Transcript;
