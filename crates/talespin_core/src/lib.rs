//! Core data types for the Talespin story interview engine.
//!
//! This crate provides the foundation data types used across all Talespin
//! crates: interview messages, generation request/response types, and
//! generation configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod message;
mod request;
mod role;
mod telemetry;

pub use config::GenerationConfig;
pub use message::{Message, MessageId, TurnId};
pub use request::{
    ChatMessage, ChatRole, GenerateRequest, GenerateRequestBuilder, GenerateResponse,
};
pub use role::{Role, Speaker};
pub use telemetry::init_telemetry;
