//! End-to-end interview flow: scripted turns, assisted handoff, and
//! finalize into storage.

use std::sync::atomic::{AtomicUsize, Ordering};
use talespin_core::{GenerateRequest, GenerateResponse, Role};
use talespin_error::{GenerationError, GenerationErrorKind, TalespinResult};
use talespin_interface::QuestionGenerator;
use talespin_interview::{InterviewMode, InterviewSession, QuestionSource, ScriptedQuestions};
use talespin_retry::RetryingGenerator;
use talespin_storage::{MemoryStore, StoryArchiver};

struct ScriptedFollowups {
    calls: AtomicUsize,
    rate_limited_calls: usize,
}

impl ScriptedFollowups {
    fn reliable() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            rate_limited_calls: 0,
        }
    }

    fn always_rate_limited() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            rate_limited_calls: usize::MAX,
        }
    }
}

#[async_trait::async_trait]
impl QuestionGenerator for ScriptedFollowups {
    async fn generate(&self, _req: &GenerateRequest) -> TalespinResult<GenerateResponse> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.rate_limited_calls {
            Err(GenerationError::new(GenerationErrorKind::RateLimited).into())
        } else {
            Ok(GenerateResponse::new(format!("Tell me more ({n})")))
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted-followups"
    }

    fn model_name(&self) -> &str {
        "test"
    }
}

fn open_session(
    generator: ScriptedFollowups,
    store: MemoryStore,
) -> InterviewSession<ScriptedFollowups, MemoryStore> {
    let source = QuestionSource::new(
        ScriptedQuestions::default(),
        RetryingGenerator::new(generator),
    );
    InterviewSession::new(source, StoryArchiver::new(store), "uid-42").unwrap()
}

#[tokio::test(start_paused = true)]
async fn scripted_run_yields_alternating_answered_pairs() {
    let mut session = open_session(ScriptedFollowups::reliable(), MemoryStore::new());
    let answers = ["The coast", "My family", "Last summer", "Skipped"];
    for answer in answers {
        session.submit_answer(answer).await.unwrap();
    }

    // Four scripted turns fully answered, plus the first assisted
    // question with its empty slot.
    let snapshot = session.transcript().snapshot();
    assert_eq!(snapshot.len(), 10);
    for (i, message) in snapshot[..8].iter().enumerate() {
        let expected = if i % 2 == 0 { Role::Question } else { Role::Answer };
        assert_eq!(message.role, expected);
        assert!(message.answered);
    }
    assert_eq!(session.mode(), InterviewMode::Assisted);
}

#[tokio::test(start_paused = true)]
async fn finalize_writes_one_story_and_drops_the_open_slot() {
    let store = MemoryStore::new();
    let mut session = open_session(ScriptedFollowups::reliable(), store.clone());
    for answer in ["The coast", "My family", "Last summer"] {
        session.submit_answer(answer).await.unwrap();
    }

    // Three answered turns and one open question with its placeholder.
    let receipt = session.finalize("Summer by the Sea").await.unwrap();
    assert_eq!(*receipt.message_count(), 7);
    assert_eq!(store.collection_len("conversations"), 1);
    assert_eq!(store.collection_len("stories"), 1);

    let (_, story) = store.documents("stories").pop().unwrap();
    assert_eq!(story["title"], "Summer by the Sea");
    assert_eq!(story["owner"], "uid-42");
    assert_eq!(story["processing"], 0);

    // A second finalize returns the same receipt and writes nothing.
    let again = session.finalize("Summer by the Sea").await.unwrap();
    assert_eq!(receipt, again);
    assert_eq!(store.collection_len("stories"), 1);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_surface_the_fallback_in_conversation() {
    let mut session = open_session(ScriptedFollowups::always_rate_limited(), MemoryStore::new());
    for answer in ["A", "B", "C", "D"] {
        session.submit_answer(answer).await.unwrap();
    }

    let question = session.current_question().unwrap();
    assert_eq!(
        question.text,
        "I'm having trouble connecting. Please try again later."
    );
    // The interview continues past the fallback; the user can answer it
    // or finalize.
    session.submit_answer("That's fine").await.unwrap();
    assert_eq!(session.mode(), InterviewMode::Assisted);
}

#[tokio::test(start_paused = true)]
async fn generation_context_is_built_from_prior_answers() {
    let mut session = open_session(ScriptedFollowups::reliable(), MemoryStore::new());
    for answer in ["The coast", "My family", "Last summer", "Portugal"] {
        session.submit_answer(answer).await.unwrap();
    }

    // The generated question lands as a normal turn in the transcript.
    let turns = session.turns();
    assert_eq!(turns.len(), 5);
    assert_eq!(turns[4].question.text, "Tell me more (0)");
    assert!(!turns[4].is_complete());
}
