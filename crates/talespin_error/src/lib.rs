//! Error types for the Talespin story interview engine.
//!
//! This crate provides the foundation error types used throughout the
//! Talespin workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use talespin_error::{TalespinResult, ValidationError};
//!
//! fn submit(text: &str) -> TalespinResult<()> {
//!     if text.trim().is_empty() {
//!         Err(ValidationError::blank_answer())?
//!     }
//!     Ok(())
//! }
//!
//! assert!(submit("   ").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod generation;
mod json;
mod persistence;
mod session;
mod transcript;
mod validation;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{TalespinError, TalespinErrorKind, TalespinResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use json::JsonError;
pub use persistence::{PersistenceError, PersistenceErrorKind};
pub use session::{SessionError, SessionErrorKind};
pub use transcript::{TranscriptError, TranscriptErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
