//! Integration tests for the persist pipeline.

use async_trait::async_trait;
use serde_json::Value;
use talespin_core::{Message, MessageId, Speaker, TurnId};
use talespin_error::{PersistenceError, PersistenceErrorKind, TalespinErrorKind, TalespinResult};
use talespin_interface::DocumentStore;
use talespin_storage::{MemoryStore, StoryArchiver};

fn answered_turn(n: u32, question: &str, answer: &str) -> Vec<Message> {
    let turn = TurnId::new(n);
    let q = Message::question(MessageId::new(format!("{}", n * 2 + 1)), turn, question);
    let mut a = Message::answer_slot(
        MessageId::new(format!("{}", n * 2 + 2)),
        turn,
        Speaker::User("uid-123".to_string()),
    );
    a.text = answer.to_string();
    a.answered = true;
    vec![q, a]
}

fn transcript_with_trailing_placeholder() -> Vec<Message> {
    let mut messages = Vec::new();
    messages.extend(answered_turn(0, "What is this story about?", "A road trip"));
    messages.extend(answered_turn(1, "Who was there?", "Skipped"));
    let turn = TurnId::new(2);
    messages.push(Message::question(MessageId::new("5"), turn, "Where was it?"));
    messages.push(Message::answer_slot(
        MessageId::new("6"),
        turn,
        Speaker::User("uid-123".to_string()),
    ));
    messages
}

#[tokio::test]
async fn persist_drops_unanswered_trailing_placeholder() {
    let store = MemoryStore::new();
    let archiver = StoryArchiver::new(store.clone());
    let transcript = transcript_with_trailing_placeholder();

    let receipt = archiver
        .persist(&transcript, "uid-123", "Road Trip")
        .await
        .unwrap();

    // The trailing placeholder is dropped; its question survives.
    assert_eq!(*receipt.message_count(), 5);
    assert_eq!(store.collection_len("conversations"), 1);
    assert_eq!(store.collection_len("stories"), 1);

    let messages = archiver
        .fetch_messages(receipt.conversation_id())
        .await
        .unwrap();
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[0].speaker, "bot");
    assert_eq!(messages[0].speech, "What is this story about?");
    assert_eq!(messages[1].speaker, "user");
    assert_eq!(messages[3].speech, "Skipped");
}

#[tokio::test]
async fn persist_counts_only_resolved_messages() {
    let store = MemoryStore::new();
    let archiver = StoryArchiver::new(store.clone());

    // One answered turn plus an open question with its placeholder:
    // three resolved messages, one dropped.
    let mut transcript = answered_turn(0, "What is this story about?", "A rescue");
    let turn = TurnId::new(1);
    transcript.push(Message::question(MessageId::new("3"), turn, "Who helped?"));
    transcript.push(Message::answer_slot(
        MessageId::new("4"),
        turn,
        Speaker::User("uid-123".to_string()),
    ));

    let receipt = archiver
        .persist(&transcript, "uid-123", "The Rescue")
        .await
        .unwrap();

    assert_eq!(*receipt.message_count(), 3);
    assert_eq!(store.collection_len("conversations"), 1);
    assert_eq!(store.collection_len("stories"), 1);
    assert_eq!(
        archiver
            .fetch_messages(receipt.conversation_id())
            .await
            .unwrap()
            .len(),
        3
    );

    let (_, story) = store.documents("stories").pop().unwrap();
    assert_eq!(story["title"], "The Rescue");
    assert_eq!(story["processing"], 0);
}

#[tokio::test]
async fn persist_three_turns_counts_three_pairs() {
    let store = MemoryStore::new();
    let archiver = StoryArchiver::new(store.clone());
    let mut transcript = Vec::new();
    transcript.extend(answered_turn(0, "Q1", "A1"));
    transcript.extend(answered_turn(1, "Q2", "A2"));
    transcript.extend(answered_turn(2, "Q3", "A3"));
    // One unanswered placeholder with no question.
    transcript.push(Message::answer_slot(
        MessageId::new("7"),
        TurnId::new(3),
        Speaker::User("uid-123".to_string()),
    ));

    let receipt = archiver.persist(&transcript, "uid-123", "").await.unwrap();
    assert_eq!(*receipt.message_count(), 6);

    let (_, story) = store.documents("stories").pop().unwrap();
    assert_eq!(story["title"], "Untitled Story");
    assert_eq!(story["processing"], 0);
    assert_eq!(story["owner"], "uid-123");
    assert_eq!(story["conversation_id"], Value::from(receipt.conversation_id().clone()));
    assert_eq!(story["story_generated_date"], "");
}

#[tokio::test]
async fn conversation_carries_participants() {
    let store = MemoryStore::new();
    let archiver = StoryArchiver::new(store.clone());

    archiver.persist(&[], "uid-123", "Empty").await.unwrap();

    let (_, conversation) = store.documents("conversations").pop().unwrap();
    let participants = conversation["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 2);
    assert_eq!(participants[0], "uid-123");
    assert_eq!(participants[1], "bot");
}

/// Store that fails all message writes but allows everything else.
#[derive(Clone)]
struct MessageWriteFailure(MemoryStore);

#[async_trait]
impl DocumentStore for MessageWriteFailure {
    async fn create_document(&self, collection: &str, data: Value) -> TalespinResult<String> {
        self.0.create_document(collection, data).await
    }

    async fn create_message(&self, _conversation_id: &str, _data: Value) -> TalespinResult<String> {
        Err(PersistenceError::new(PersistenceErrorKind::Unavailable("write quota".to_string())).into())
    }

    async fn list_messages(&self, conversation_id: &str) -> TalespinResult<Vec<Value>> {
        self.0.list_messages(conversation_id).await
    }
}

#[tokio::test]
async fn failed_message_writes_abort_before_story() {
    let inner = MemoryStore::new();
    let archiver = StoryArchiver::new(MessageWriteFailure(inner.clone()));
    let transcript = answered_turn(0, "Q1", "A1");

    let err = archiver
        .persist(&transcript, "uid-123", "Doomed")
        .await
        .unwrap_err();

    match err.kind() {
        TalespinErrorKind::Persistence(p) => {
            assert!(matches!(p.kind, PersistenceErrorKind::MessageWrite { .. }))
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
    // The conversation was written (no rollback), but no story exists.
    assert_eq!(inner.collection_len("conversations"), 1);
    assert_eq!(inner.collection_len("stories"), 0);
}
