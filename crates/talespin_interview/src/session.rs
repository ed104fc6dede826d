//! The interview state machine behind the create-story flow.

use crate::{QuestionSource, Transcript};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use talespin_core::{Message, MessageId, Role, Speaker};
use talespin_error::{
    SessionError, SessionErrorKind, TalespinResult, TranscriptError, TranscriptErrorKind,
    ValidationError, ValidationErrorKind,
};
use talespin_interface::{DocumentStore, GenerationStatus, QuestionGenerator, TurnView};
use talespin_storage::{PersistReceipt, StoryArchiver};
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Which source currently supplies questions.
///
/// The transition from `Scripted` to `Assisted` happens once, when the
/// scripted list is exhausted, and never reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewMode {
    /// Questions come from the pre-authored list
    Scripted,
    /// Questions are generated from prior answers
    Assisted,
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// A question is on screen waiting for the user's answer
    AwaitingAnswer,
    /// Finalize was invoked; no further input is accepted
    Finished,
}

/// UI pacing delays applied before the next question appears.
///
/// All fields have serde defaults so a TOML override file only needs to
/// name the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(deny_unknown_fields)]
pub struct PacingConfig {
    /// Delay before the next scripted question appears (default 500ms).
    #[serde(default = "default_scripted_delay_ms")]
    scripted_delay_ms: u64,

    /// Delay before a generation call is issued (default 1000ms).
    #[serde(default = "default_generation_delay_ms")]
    generation_delay_ms: u64,
}

fn default_scripted_delay_ms() -> u64 {
    500
}

fn default_generation_delay_ms() -> u64 {
    1000
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            scripted_delay_ms: default_scripted_delay_ms(),
            generation_delay_ms: default_generation_delay_ms(),
        }
    }
}

/// One interview session: turn-taking, mode transitions, and finalize.
///
/// The session owns its [`Transcript`] exclusively and processes one
/// event at a time; every method takes `&mut self`, so transitions run
/// to completion without interleaving. Submitting an answer resolves the
/// active slot and appends the next question, scripted while the script
/// lasts and generated afterward. The session ends only on an explicit
/// [`finalize`](Self::finalize); assisted mode keeps producing follow-up
/// questions indefinitely.
pub struct InterviewSession<G, S> {
    transcript: Transcript,
    source: QuestionSource<G>,
    archiver: StoryArchiver<S>,
    owner: String,
    mode: InterviewMode,
    phase: SessionPhase,
    current_question_index: usize,
    active_answer: Option<MessageId>,
    pending_edit: Option<MessageId>,
    pacing: PacingConfig,
    receipt: Option<PersistReceipt>,
}

// Manual impl: the generator and store are opaque handles, so no Debug
// bounds are imposed on G or S.
impl<G, S> std::fmt::Debug for InterviewSession<G, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterviewSession")
            .field("owner", &self.owner)
            .field("mode", &self.mode)
            .field("phase", &self.phase)
            .field("current_question_index", &self.current_question_index)
            .field("messages", &self.transcript.len())
            .finish_non_exhaustive()
    }
}

impl<G: QuestionGenerator, S: DocumentStore> InterviewSession<G, S> {
    /// Open a session with the default pacing.
    ///
    /// Appends the first scripted question immediately. Fails if the
    /// source's script is empty; an interview must open with at least
    /// one scripted question.
    pub fn new(
        source: QuestionSource<G>,
        archiver: StoryArchiver<S>,
        owner: impl Into<String>,
    ) -> TalespinResult<Self> {
        Self::with_pacing(source, archiver, owner, PacingConfig::default())
    }

    /// Open a session with explicit pacing delays.
    pub fn with_pacing(
        source: QuestionSource<G>,
        archiver: StoryArchiver<S>,
        owner: impl Into<String>,
        pacing: PacingConfig,
    ) -> TalespinResult<Self> {
        let first = source.scripted(0).map(str::to_string).ok_or_else(|| {
            ValidationError::new(ValidationErrorKind::InvalidField {
                field: "scripted_questions".to_string(),
                reason: "an interview must open with at least one scripted question".to_string(),
            })
        })?;
        let owner = owner.into();
        let mut session = Self {
            transcript: Transcript::new(),
            source,
            archiver,
            owner,
            mode: InterviewMode::Scripted,
            phase: SessionPhase::AwaitingAnswer,
            current_question_index: 0,
            active_answer: None,
            pending_edit: None,
            pacing,
            receipt: None,
        };
        session.append_question(first)?;
        Ok(session)
    }

    /// The current question source mode.
    pub fn mode(&self) -> InterviewMode {
        self.mode
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Position in the scripted question list.
    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    /// The transcript accumulated so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Question/answer pairs for rendering.
    pub fn turns(&self) -> Vec<TurnView> {
        self.transcript.turns()
    }

    /// The question currently awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&Message> {
        let active = self.active_answer.as_ref()?;
        let slot = self.transcript.get(active)?;
        self.transcript
            .snapshot()
            .iter()
            .find(|m| m.role == Role::Question && m.turn == slot.turn)
    }

    /// Subscribe to the generation loading state.
    pub fn generation_status(&self) -> watch::Receiver<GenerationStatus> {
        self.source.status()
    }

    /// Submit the user's answer to the current question.
    ///
    /// Rejects blank input with no state change. On success the answer
    /// is resolved in the transcript and, after a short pacing delay,
    /// the next question appears: the next scripted one, or a generated
    /// one once the script is exhausted (flipping the session to
    /// assisted mode permanently).
    #[instrument(skip(self, text))]
    pub async fn submit_answer(&mut self, text: &str) -> TalespinResult<()> {
        self.ensure_open()?;
        if self.pending_edit.is_some() {
            return Err(SessionError::new(SessionErrorKind::EditInProgress).into());
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::blank_answer().into());
        }
        let active = self
            .active_answer
            .clone()
            .ok_or_else(|| SessionError::new(SessionErrorKind::NoActiveQuestion))?;
        self.transcript.resolve_answer(&active, trimmed)?;
        debug!(answer_id = active.as_str(), "Answer resolved");
        self.advance().await
    }

    /// Skip the current question.
    ///
    /// Recorded as the literal answer text `"Skipped"`; the interview
    /// advances exactly as if the user had typed it.
    pub async fn skip(&mut self) -> TalespinResult<()> {
        self.submit_answer("Skipped").await
    }

    /// Re-open a previously answered slot for editing.
    ///
    /// At most one edit may be open at a time. Editing never advances
    /// the interview or triggers generation.
    pub fn begin_edit(&mut self, id: &MessageId) -> TalespinResult<()> {
        self.ensure_open()?;
        if self.pending_edit.is_some() {
            return Err(SessionError::new(SessionErrorKind::EditInProgress).into());
        }
        let message = self.transcript.get(id).ok_or_else(|| {
            TranscriptError::new(TranscriptErrorKind::NotFound(id.as_str().to_string()))
        })?;
        if message.role == Role::Question {
            return Err(TranscriptError::new(TranscriptErrorKind::NotAnAnswer(
                id.as_str().to_string(),
            ))
            .into());
        }
        if !message.answered {
            return Err(ValidationError::new(ValidationErrorKind::InvalidField {
                field: "message".to_string(),
                reason: "only answered messages can be edited".to_string(),
            })
            .into());
        }
        self.pending_edit = Some(id.clone());
        Ok(())
    }

    /// Overwrite the text of the slot opened by [`begin_edit`](Self::begin_edit).
    ///
    /// Blank replacement text is rejected and the edit stays open.
    pub fn save_edit(&mut self, text: &str) -> TalespinResult<()> {
        let id = self
            .pending_edit
            .clone()
            .ok_or_else(|| SessionError::new(SessionErrorKind::NoPendingEdit))?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::blank_answer().into());
        }
        self.transcript.resolve_answer(&id, trimmed)?;
        self.pending_edit = None;
        debug!(answer_id = id.as_str(), "Answer edited in place");
        Ok(())
    }

    /// Close the open edit without changing the transcript.
    pub fn cancel_edit(&mut self) -> TalespinResult<()> {
        if self.pending_edit.take().is_none() {
            return Err(SessionError::new(SessionErrorKind::NoPendingEdit).into());
        }
        Ok(())
    }

    /// Finalize the interview, persisting the transcript as a story.
    ///
    /// The session moves to `Finished` before the write starts and stays
    /// there even if persistence fails, so the caller may retry finalize
    /// without accepting further answers. A finalize after a successful
    /// one returns the stored receipt without writing anything; one
    /// session never produces two story records.
    #[instrument(skip(self, title), fields(owner = %self.owner))]
    pub async fn finalize(&mut self, title: &str) -> TalespinResult<PersistReceipt> {
        if let Some(receipt) = &self.receipt {
            info!("Finalize repeated after success, returning stored receipt");
            return Ok(receipt.clone());
        }
        self.phase = SessionPhase::Finished;
        self.pending_edit = None;

        match self
            .archiver
            .persist(self.transcript.snapshot(), &self.owner, title)
            .await
        {
            Ok(receipt) => {
                info!(
                    conversation_id = receipt.conversation_id().as_str(),
                    messages = receipt.message_count(),
                    "Interview finalized"
                );
                self.receipt = Some(receipt.clone());
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "Finalize failed, session stays closed for retry");
                Err(e)
            }
        }
    }

    /// The receipt from a successful finalize, if one happened.
    pub fn receipt(&self) -> Option<&PersistReceipt> {
        self.receipt.as_ref()
    }

    fn ensure_open(&self) -> TalespinResult<()> {
        if self.phase == SessionPhase::Finished {
            return Err(SessionError::new(SessionErrorKind::Closed).into());
        }
        Ok(())
    }

    async fn advance(&mut self) -> TalespinResult<()> {
        match self.mode {
            InterviewMode::Scripted => {
                let next_index = self.current_question_index + 1;
                if let Some(question) = self.source.scripted(next_index).map(str::to_string) {
                    sleep(Duration::from_millis(*self.pacing.scripted_delay_ms())).await;
                    self.append_question(question)?;
                    self.current_question_index = next_index;
                } else {
                    info!("Scripted questions exhausted, switching to assisted mode");
                    self.mode = InterviewMode::Assisted;
                    self.generate_next().await?;
                }
            }
            InterviewMode::Assisted => self.generate_next().await?,
        }
        Ok(())
    }

    async fn generate_next(&mut self) -> TalespinResult<()> {
        sleep(Duration::from_millis(*self.pacing.generation_delay_ms())).await;
        let generated = self.source.generated(&self.transcript).await?;
        if generated.fallback {
            warn!("Appending fallback question after generation gave up");
        }
        self.append_question(generated.text)
    }

    fn append_question(&mut self, text: String) -> TalespinResult<()> {
        let answerer = Speaker::User(self.owner.clone());
        let answer_id = self.transcript.append_turn(text, answerer)?;
        self.active_answer = Some(answer_id);
        Ok(())
    }
}
