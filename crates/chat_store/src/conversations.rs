//! Conversation repository

use chat_core::Conversation;
use chrono::Utc;
use entity_store::{EntityStore, Result, SortOrder};

use crate::branches::BranchStore;

/// Fields of a conversation that can be updated. Omitted fields retain
/// their prior value; the merge never replaces the whole record.
#[derive(Debug, Clone, Default)]
pub struct ConversationPatch {
    pub branch_ids: Option<Vec<String>>,
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct ConversationStore {
    store: EntityStore,
}

impl ConversationStore {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, conversation: &Conversation) -> Result<()> {
        self.store.put(conversation).await
    }

    pub async fn get(&self, conversation_id: &str) -> Result<Option<Conversation>> {
        self.store.get(conversation_id).await
    }

    /// All conversations, most recently updated first.
    pub async fn list_all(&self) -> Result<Vec<Conversation>> {
        self.store.list_all(SortOrder::Descending).await
    }

    /// Partial-field merge. Always stamps `updated_at`. Updating a
    /// missing id is a no-op.
    pub async fn update(&self, conversation_id: &str, patch: ConversationPatch) -> Result<()> {
        let Some(mut conversation) = self.store.get::<Conversation>(conversation_id).await? else {
            return Ok(());
        };

        if let Some(branch_ids) = patch.branch_ids {
            conversation.branch_ids = branch_ids;
        }
        if let Some(name) = patch.name {
            conversation.name = Some(name);
        }
        if let Some(tags) = patch.tags {
            conversation.tags = tags;
        }
        conversation.updated_at = Utc::now();

        self.store.put(&conversation).await
    }

    /// Delete a conversation and everything under it: every branch whose
    /// `conversation_id` points here, and transitively their messages.
    pub async fn delete(&self, conversation_id: &str) -> Result<()> {
        let branches = BranchStore::new(self.store.clone());

        for branch in branches.list_by_conversation(conversation_id).await? {
            branches.delete(&branch.id).await?;
        }

        tracing::debug!(conversation_id, "conversation deleted");
        self.store.delete::<Conversation>(conversation_id).await
    }
}
