//! The persist pipeline: transcript snapshot to durable documents.

use crate::documents::{CONVERSATIONS, STORIES};
use crate::{ConversationDoc, MessageDoc, PersistReceipt, StoryDoc};
use futures_util::future::try_join_all;
use talespin_core::Message;
use talespin_error::{JsonError, PersistenceError, PersistenceErrorKind, TalespinResult};
use talespin_interface::DocumentStore;
use tracing::{debug, instrument, warn};

/// Writes a transcript out as conversation + messages + story.
///
/// The three steps form one logical operation: any failure aborts the
/// remaining steps and surfaces as a single error. Documents already
/// written are not rolled back; the error kinds carry the conversation
/// id so orphans can be found.
///
/// # Examples
///
/// ```
/// use talespin_storage::{MemoryStore, StoryArchiver};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archiver = StoryArchiver::new(MemoryStore::new());
/// let receipt = archiver.persist(&[], "uid-123", "My Trip").await?;
/// assert_eq!(*receipt.message_count(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StoryArchiver<S> {
    store: S,
}

impl<S: DocumentStore> StoryArchiver<S> {
    /// Create an archiver over a document store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a transcript snapshot for the given owner.
    ///
    /// Unanswered trailing placeholders are dropped silently; only
    /// messages that are answered with non-empty text are written.
    /// Message writes are issued concurrently but must all complete
    /// before the story record is created.
    #[instrument(skip(self, transcript), fields(owner = %owner, messages = transcript.len()))]
    pub async fn persist(
        &self,
        transcript: &[Message],
        owner: &str,
        title: &str,
    ) -> TalespinResult<PersistReceipt> {
        let resolved: Vec<&Message> = transcript.iter().filter(|m| m.is_resolved()).collect();
        debug!(resolved = resolved.len(), "Persisting transcript");

        let conversation = ConversationDoc::new(owner);
        let conversation_id = self
            .store
            .create_document(CONVERSATIONS, to_json(&conversation)?)
            .await
            .map_err(|e| {
                warn!(error = %e, "Conversation write failed");
                PersistenceError::new(PersistenceErrorKind::Conversation(e.to_string()))
            })?;

        let writes = resolved.iter().map(|msg| {
            let doc = MessageDoc {
                message_time: msg.created_at.to_rfc3339(),
                speaker: msg.speaker.tag().to_string(),
                speech: msg.text.clone(),
            };
            let conversation_id = conversation_id.clone();
            async move {
                self.store
                    .create_message(&conversation_id, to_json(&doc)?)
                    .await
            }
        });
        try_join_all(writes).await.map_err(|e| {
            warn!(error = %e, conversation_id = %conversation_id, "Message writes failed");
            PersistenceError::new(PersistenceErrorKind::MessageWrite {
                conversation_id: conversation_id.clone(),
                reason: e.to_string(),
            })
        })?;

        let story = StoryDoc::new(&conversation_id, owner, title);
        let story_id = self
            .store
            .create_document(STORIES, to_json(&story)?)
            .await
            .map_err(|e| {
                warn!(error = %e, conversation_id = %conversation_id, "Story write failed");
                PersistenceError::new(PersistenceErrorKind::Story {
                    conversation_id: conversation_id.clone(),
                    reason: e.to_string(),
                })
            })?;

        debug!(
            conversation_id = %conversation_id,
            story_id = %story_id,
            "Transcript persisted"
        );
        Ok(PersistReceipt::new(
            conversation_id,
            story_id,
            resolved.len(),
        ))
    }

    /// Read a conversation's messages back in persisted order.
    ///
    /// This serves the existing story detail readers; the question and
    /// answer roles are reconstructed from the speaker tags.
    #[instrument(skip(self))]
    pub async fn fetch_messages(&self, conversation_id: &str) -> TalespinResult<Vec<MessageDoc>> {
        let raw = self.store.list_messages(conversation_id).await.map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Read {
                conversation_id: conversation_id.to_string(),
                reason: e.to_string(),
            })
        })?;

        raw.into_iter()
            .map(|value| {
                serde_json::from_value(value)
                    .map_err(|e| JsonError::new(format!("Malformed message document: {}", e)).into())
            })
            .collect()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> TalespinResult<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| JsonError::new(format!("Failed to serialize document: {}", e)).into())
}
