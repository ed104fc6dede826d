//! Wire types for the OpenAI chat completions API.

use serde::{Deserialize, Serialize};

/// One chat message in the OpenAI wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiMessage {
    /// "system", "user", or "assistant"
    pub role: String,
    /// Text content of the message
    pub content: String,
}

impl OpenAiMessage {
    /// Create a wire message.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Request body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct OpenAiRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages, system instruction first
    pub messages: Vec<OpenAiMessage>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub temperature: Option<f32>,
}

impl OpenAiRequest {
    /// Start building a request.
    pub fn builder() -> OpenAiRequestBuilder {
        OpenAiRequestBuilder::default()
    }
}

/// One completion choice in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiChoice {
    /// The completion message
    pub message: OpenAiMessage,
    /// Why generation stopped, if reported
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Response body from the chat completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct OpenAiResponse {
    /// Response identifier
    id: String,
    /// Completion choices; the first carries the generated question
    choices: Vec<OpenAiChoice>,
}

impl OpenAiResponse {
    /// The text of the first completion choice, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_sampling_fields() {
        let request = OpenAiRequest::builder()
            .model("gpt-3.5-turbo")
            .messages(vec![OpenAiMessage::new("user", "hi")])
            .build()
            .unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn response_first_text() {
        let body = serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [
                {"message": {"role": "assistant", "content": "What happened next?"}}
            ]
        });
        let response: OpenAiResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.first_text(), Some("What happened next?"));
    }
}
