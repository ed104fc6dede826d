//! Trait definitions for the Talespin story interview engine.
//!
//! This crate provides the seams between the interview core and its
//! external collaborators: the remote question generator and the document
//! storage backend, plus the view types the UI layer consumes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{DocumentStore, QuestionGenerator};
pub use types::{GenerationStatus, TurnView};
