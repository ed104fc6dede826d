//! Bounded retry and backoff for Talespin question generation.
//!
//! This crate wraps any [`talespin_interface::QuestionGenerator`] with the
//! retry discipline the interview engine requires:
//!
//! - rate-limited calls retry with exponential backoff, bounded by a
//!   hard attempt ceiling
//! - any other failure is terminal on first occurrence
//! - exhausted or terminal failures degrade to a fixed fallback question
//!   instead of surfacing a hard error to the user
//! - at most one generation call is in flight per session; concurrent
//!   invocations are rejected
//! - the current loading state is observable through a watch channel

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod controller;
mod policy;

pub use controller::{GeneratedQuestion, RetryingGenerator};
pub use policy::RetryPolicy;
