//! Uniform access to scripted and generated questions.

use crate::{ScriptedQuestions, Transcript};
use talespin_core::{ChatMessage, ChatRole, GenerateRequest, GenerationConfig};
use talespin_error::TalespinResult;
use talespin_interface::{GenerationStatus, QuestionGenerator};
use talespin_retry::{GeneratedQuestion, RetryingGenerator};
use tokio::sync::watch;
use tracing::debug;

/// Supplies the next question for an interview, scripted first and
/// generated once the script is exhausted.
///
/// Generation requests carry the configured system instruction plus the
/// most recent completed turns, oldest-first, capped at
/// [`GenerationConfig::context_turns`] to bound payload size.
pub struct QuestionSource<G> {
    script: ScriptedQuestions,
    generator: RetryingGenerator<G>,
    config: GenerationConfig,
}

impl<G: QuestionGenerator> QuestionSource<G> {
    /// Create a source with the default generation parameters.
    pub fn new(script: ScriptedQuestions, generator: RetryingGenerator<G>) -> Self {
        Self::with_config(script, generator, GenerationConfig::default())
    }

    /// Create a source with explicit generation parameters.
    pub fn with_config(
        script: ScriptedQuestions,
        generator: RetryingGenerator<G>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            script,
            generator,
            config,
        }
    }

    /// The scripted question at `index`, or `None` once exhausted.
    pub fn scripted(&self, index: usize) -> Option<&str> {
        self.script.next(index)
    }

    /// Number of scripted questions before generation takes over.
    pub fn scripted_len(&self) -> usize {
        self.script.len()
    }

    /// Subscribe to the generation loading state.
    pub fn status(&self) -> watch::Receiver<GenerationStatus> {
        self.generator.status()
    }

    /// Generate the next question from the transcript so far.
    ///
    /// Rate limits are retried with backoff inside the generator; an
    /// exhausted or terminal failure yields the fallback question rather
    /// than an error.
    pub async fn generated(&self, transcript: &Transcript) -> TalespinResult<GeneratedQuestion> {
        let request = self.build_request(transcript);
        debug!(
            context_messages = request.messages.len(),
            "Requesting generated question"
        );
        self.generator.next_question(&request).await
    }

    fn build_request(&self, transcript: &Transcript) -> GenerateRequest {
        let mut messages = vec![ChatMessage::new(
            ChatRole::System,
            self.config.system_prompt().clone(),
        )];

        let completed: Vec<_> = transcript
            .turns()
            .into_iter()
            .filter(|turn| turn.is_complete())
            .collect();
        let skip = completed.len().saturating_sub(*self.config.context_turns());
        for turn in completed.into_iter().skip(skip) {
            messages.push(ChatMessage::new(ChatRole::Assistant, turn.question.text));
            if let Some(answer) = turn.answer {
                messages.push(ChatMessage::new(ChatRole::User, answer.text));
            }
        }

        GenerateRequest {
            messages,
            max_tokens: Some(*self.config.max_tokens()),
            temperature: Some(*self.config.temperature()),
            model: Some(self.config.model().clone()),
        }
    }
}
