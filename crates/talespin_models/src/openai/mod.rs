//! OpenAI chat completions provider.

mod client;
mod wire;

pub use client::OpenAiClient;
pub use wire::{OpenAiChoice, OpenAiMessage, OpenAiRequest, OpenAiRequestBuilder, OpenAiResponse};
