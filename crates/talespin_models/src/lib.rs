//! Text-generation provider clients for Talespin.
//!
//! This crate implements the [`talespin_interface::QuestionGenerator`]
//! trait against remote chat-completion APIs. One provider is supported:
//!
//! - **OpenAI** chat completions (the API the production app calls)
//!
//! # Example
//!
//! ```no_run
//! use talespin_core::{ChatMessage, ChatRole, GenerateRequest};
//! use talespin_interface::QuestionGenerator;
//! use talespin_models::OpenAiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::from_env()?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![ChatMessage::new(ChatRole::User, "My story is about a dog.")])
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("Next question: {}", response.text);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::{
    OpenAiChoice, OpenAiClient, OpenAiMessage, OpenAiRequest, OpenAiRequestBuilder,
    OpenAiResponse,
};
