//! Generation configuration.

use serde::{Deserialize, Serialize};
use talespin_error::{ConfigError, TalespinResult};

/// Default system instruction steering the generator toward short,
/// specific, non-repeating follow-up questions.
const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI assistant helping users tell stories. \
The user has answered basic questions about their story. \
Your task is to ask follow-up questions to help them develop their story with more details. \
Ask short, specific, and easy-to-understand questions. \
Only ask one question at a time. \
Base your questions on their previous answers. \
Don't repeat questions that have already been asked.";

/// Parameters for remote question generation.
///
/// All fields have serde defaults so a TOML override file only needs to
/// name the values it changes.
///
/// # Examples
///
/// ```
/// use talespin_core::GenerationConfig;
///
/// let config = GenerationConfig::default();
/// assert_eq!(*config.context_turns(), 5);
/// assert_eq!(*config.max_tokens(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Model identifier (default "gpt-3.5-turbo").
    #[serde(default = "default_model")]
    model: String,

    /// Upper bound on generated tokens (default 50; questions are short).
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Sampling temperature (default 0.7).
    #[serde(default = "default_temperature")]
    temperature: f32,

    /// How many of the most recent answered turns to send as context
    /// (default 5). This bounds request payload size.
    #[serde(default = "default_context_turns")]
    context_turns: usize,

    /// Request timeout in seconds (default 10).
    #[serde(default = "default_timeout_secs")]
    request_timeout_secs: u64,

    /// System instruction prepended to every generation request.
    #[serde(default = "default_system_prompt")]
    system_prompt: String,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    50
}

fn default_temperature() -> f32 {
    0.7
}

fn default_context_turns() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl GenerationConfig {
    /// Parses a TOML override file. Absent fields keep their defaults;
    /// unknown or ill-typed fields are rejected.
    pub fn from_toml_str(raw: &str) -> TalespinResult<Self> {
        toml::from_str(raw).map_err(|e| ConfigError::new(e.to_string()).into())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            context_turns: default_context_turns(),
            request_timeout_secs: default_timeout_secs(),
            system_prompt: default_system_prompt(),
        }
    }
}
