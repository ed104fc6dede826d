//! OpenAI API client.

use super::wire::OpenAiRequestBuilderError;
use crate::{OpenAiMessage, OpenAiRequest, OpenAiResponse};
use std::time::Duration;
use talespin_core::{ChatRole, GenerateRequest, GenerateResponse, GenerationConfig};
use talespin_error::{
    BuilderError, BuilderErrorKind, GenerationError, GenerationErrorKind, TalespinResult,
};
use talespin_interface::QuestionGenerator;
use tracing::{debug, error, instrument};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI chat completions client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    config: GenerationConfig,
}

impl OpenAiClient {
    /// Creates a new OpenAI client with default generation parameters.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    pub fn new(api_key: impl Into<String>) -> TalespinResult<Self> {
        Self::with_config(api_key, GenerationConfig::default())
    }

    /// Creates a new OpenAI client with explicit generation parameters.
    ///
    /// The request timeout from the config is applied to the underlying
    /// HTTP client.
    pub fn with_config(
        api_key: impl Into<String>,
        config: GenerationConfig,
    ) -> TalespinResult<Self> {
        let api_key = api_key.into();
        debug!(model = %config.model(), "Creating new OpenAI client");
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(*config.request_timeout_secs()))
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Transport(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;
        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Creates a client from the `OPENAI_API_KEY` environment variable.
    ///
    /// Loads `.env` first if present, so local development keys are
    /// picked up without exporting.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not set.
    pub fn from_env() -> TalespinResult<Self> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| GenerationError::new(GenerationErrorKind::MissingApiKey))?;
        Self::new(api_key)
    }

    /// Sends a request to the chat completions endpoint.
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn generate_openai(
        &self,
        request: &OpenAiRequest,
    ) -> Result<OpenAiResponse, GenerationError> {
        debug!("Sending request to OpenAI API");

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to OpenAI API");
                if e.is_timeout() {
                    GenerationError::new(GenerationErrorKind::Transport(
                        "Request timed out".to_string(),
                    ))
                } else {
                    GenerationError::new(GenerationErrorKind::Transport(format!(
                        "Request failed: {}",
                        e
                    )))
                }
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            error!("OpenAI API rate limited the request");
            return Err(GenerationError::new(GenerationErrorKind::RateLimited));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "OpenAI API returned error");
            return Err(GenerationError::new(GenerationErrorKind::ApiStatus {
                status: status.as_u16(),
                message: body,
            }));
        }

        let openai_response: OpenAiResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse OpenAI response");
            GenerationError::new(GenerationErrorKind::Parse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(response_id = %openai_response.id(), "Received response from OpenAI");
        Ok(openai_response)
    }

    /// Converts a Talespin GenerateRequest to an OpenAI API request.
    fn convert_request(&self, request: &GenerateRequest) -> TalespinResult<OpenAiRequest> {
        let messages: Vec<OpenAiMessage> = request
            .messages
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    ChatRole::System => "system",
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                };
                OpenAiMessage::new(role, msg.content.clone())
            })
            .collect();

        let wire = OpenAiRequest::builder()
            .model(
                request
                    .model
                    .clone()
                    .unwrap_or_else(|| self.config.model().clone()),
            )
            .messages(messages)
            .max_tokens(request.max_tokens.or(Some(*self.config.max_tokens())))
            .temperature(request.temperature.or(Some(*self.config.temperature())))
            .build()
            .map_err(builder_error)?;
        Ok(wire)
    }

    /// Converts an OpenAI API response to a Talespin GenerateResponse.
    fn convert_response(response: &OpenAiResponse) -> Result<GenerateResponse, GenerationError> {
        let text = response
            .first_text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyCompletion))?;
        Ok(GenerateResponse::new(text))
    }
}

/// Maps a derive_builder failure into the builder error domain.
fn builder_error(err: OpenAiRequestBuilderError) -> BuilderError {
    match err {
        OpenAiRequestBuilderError::UninitializedField(field) => {
            BuilderError::new(BuilderErrorKind::MissingField(field.to_string()))
        }
        other => BuilderError::new(BuilderErrorKind::ValidationFailed(other.to_string())),
    }
}

#[async_trait::async_trait]
impl QuestionGenerator for OpenAiClient {
    #[instrument(skip(self, request), fields(provider = "openai"))]
    async fn generate(&self, request: &GenerateRequest) -> TalespinResult<GenerateResponse> {
        debug!("Generating next question with OpenAI");

        let openai_request = self.convert_request(request)?;
        let openai_response = self.generate_openai(&openai_request).await?;
        let response = Self::convert_response(&openai_response)?;

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}
