//! Trait definitions for external collaborators.

use async_trait::async_trait;
use talespin_core::{GenerateRequest, GenerateResponse};
use talespin_error::TalespinResult;

/// Remote text-generation service that produces the next question.
///
/// This is the minimal interface the interview engine needs from a
/// provider. Implementations live in `talespin_models`; the retry
/// controller in `talespin_retry` wraps any implementation without
/// knowing which provider backs it.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Generate a completion for the given chat request.
    async fn generate(&self, req: &GenerateRequest) -> TalespinResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-3.5-turbo").
    fn model_name(&self) -> &str;
}

/// Document database backend the persistence layer writes to.
///
/// Modeled on the document/subcollection shape of the production backend:
/// top-level collections addressed by name, and per-conversation message
/// subcollections. The exact document field names are owned by
/// `talespin_storage`; this trait only moves JSON documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document in a top-level collection, returning its id.
    async fn create_document(
        &self,
        collection: &str,
        data: serde_json::Value,
    ) -> TalespinResult<String>;

    /// Create a message document under a conversation, returning its id.
    async fn create_message(
        &self,
        conversation_id: &str,
        data: serde_json::Value,
    ) -> TalespinResult<String>;

    /// List a conversation's message documents in persisted order.
    async fn list_messages(&self, conversation_id: &str) -> TalespinResult<Vec<serde_json::Value>>;
}
