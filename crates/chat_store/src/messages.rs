//! Message repository

use chat_core::Message;
use entity_store::{EntityStore, IndexField, Result};

/// Fields of a message that can be updated. Messages are append-only in
/// normal operation; this exists for completeness of the repository
/// contract, not for rewriting history.
#[derive(Debug, Clone, Default)]
pub struct MessagePatch {
    pub content: Option<String>,
}

#[derive(Clone)]
pub struct MessageStore {
    store: EntityStore,
}

impl MessageStore {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, message: &Message) -> Result<()> {
        self.store.put(message).await
    }

    pub async fn get(&self, message_id: &str) -> Result<Option<Message>> {
        self.store.get(message_id).await
    }

    /// Messages of a branch in chronological order.
    pub async fn list_by_branch(&self, branch_id: &str) -> Result<Vec<Message>> {
        self.store.query_by_index(IndexField::BranchId, branch_id).await
    }

    /// Updating a missing id is a no-op.
    pub async fn update(&self, message_id: &str, patch: MessagePatch) -> Result<()> {
        let Some(mut message) = self.store.get::<Message>(message_id).await? else {
            return Ok(());
        };

        if let Some(content) = patch.content {
            message.content = content;
        }

        self.store.put(&message).await
    }

    pub async fn delete(&self, message_id: &str) -> Result<()> {
        self.store.delete::<Message>(message_id).await
    }
}
