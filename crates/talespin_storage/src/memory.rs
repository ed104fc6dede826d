//! In-memory document store.
//!
//! Backs tests and local development; the production app supplies its
//! own [`DocumentStore`] over the hosted document database.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use talespin_error::{PersistenceError, PersistenceErrorKind, TalespinResult};
use talespin_interface::DocumentStore;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, Vec<(String, Value)>>,
    messages: HashMap<String, Vec<(String, Value)>>,
}

/// In-memory [`DocumentStore`] implementation.
///
/// Cloning shares the underlying storage, mirroring how a real backend
/// handle behaves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub fn collection_len(&self, collection: &str) -> usize {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.collections.get(collection).map_or(0, Vec::len)
    }

    /// All documents in a collection, in insertion order.
    pub fn documents(&self, collection: &str) -> Vec<(String, Value)> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.collections.get(collection).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(&self, collection: &str, data: Value) -> TalespinResult<String> {
        let id = Uuid::new_v4().to_string();
        let mut inner = self.inner.lock().map_err(poisoned)?;
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), data));
        Ok(id)
    }

    async fn create_message(&self, conversation_id: &str, data: Value) -> TalespinResult<String> {
        let id = Uuid::new_v4().to_string();
        let mut inner = self.inner.lock().map_err(poisoned)?;
        inner
            .messages
            .entry(conversation_id.to_string())
            .or_default()
            .push((id.clone(), data));
        Ok(id)
    }

    async fn list_messages(&self, conversation_id: &str) -> TalespinResult<Vec<Value>> {
        let inner = self.inner.lock().map_err(poisoned)?;
        let mut docs: Vec<Value> = inner
            .messages
            .get(conversation_id)
            .map(|msgs| msgs.iter().map(|(_, v)| v.clone()).collect())
            .unwrap_or_default();
        // Concurrent writes may land out of order; readers sort by
        // message_time the way the production queries do.
        docs.sort_by(|a, b| {
            let ta = a.get("message_time").and_then(Value::as_str).unwrap_or("");
            let tb = b.get("message_time").and_then(Value::as_str).unwrap_or("");
            ta.cmp(tb)
        });
        Ok(docs)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> talespin_error::TalespinError {
    PersistenceError::new(PersistenceErrorKind::Unavailable(
        "memory store lock poisoned".to_string(),
    ))
    .into()
}
