//! Request and response types for question generation.

use serde::{Deserialize, Serialize};

/// Chat roles understood by remote text-generation services.
///
/// These are distinct from [`crate::Role`]: transcript questions map to
/// `Assistant` turns and answers to `User` turns when building a request.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System messages provide context and instructions
    System,
    /// User messages are from the human
    User,
    /// Assistant messages are from the AI
    Assistant,
}

/// One chat turn sent to the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender
    pub role: ChatRole,
    /// The text content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a chat message.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Generation request sent to a remote text-generation service.
///
/// # Examples
///
/// ```
/// use talespin_core::{ChatMessage, ChatRole, GenerateRequest};
///
/// let request = GenerateRequest {
///     messages: vec![ChatMessage::new(ChatRole::User, "My story is about a dog.")],
///     max_tokens: Some(50),
///     temperature: Some(0.7),
///     model: Some("gpt-3.5-turbo".to_string()),
/// };
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.max_tokens, Some(50));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<ChatMessage>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier to use
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Start building a request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The single textual completion returned by the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated text
    pub text: String,
}

impl GenerateResponse {
    /// Create a response from completion text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
