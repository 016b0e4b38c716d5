//! Facade bundling the three typed repositories.

use std::sync::Arc;

use chat_core::{Branch, Conversation, Message};
use entity_store::{EntityStore, Result, SortOrder, StorageBackend};
use serde::{Deserialize, Serialize};

use crate::branches::BranchStore;
use crate::conversations::ConversationStore;
use crate::messages::MessageStore;

/// Snapshot of all three tables, for backup and transfer.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ExportData {
    pub conversations: Vec<Conversation>,
    pub branches: Vec<Branch>,
    pub messages: Vec<Message>,
}

/// The repository layer as one handle.
#[derive(Clone)]
pub struct ChatStore {
    pub conversations: ConversationStore,
    pub branches: BranchStore,
    pub messages: MessageStore,
    store: EntityStore,
}

impl ChatStore {
    /// Open over a backend, running pending schema migrations.
    pub async fn open(backend: Arc<dyn StorageBackend>) -> Result<Self> {
        Ok(Self::new(EntityStore::open(backend).await?))
    }

    pub fn new(store: EntityStore) -> Self {
        Self {
            conversations: ConversationStore::new(store.clone()),
            branches: BranchStore::new(store.clone()),
            messages: MessageStore::new(store.clone()),
            store,
        }
    }

    /// Availability probe of the underlying engine. Check before offering
    /// create actions; writes fail loudly either way.
    pub async fn is_available(&self) -> bool {
        self.store.is_available().await
    }

    /// Create a conversation together with its first branch.
    ///
    /// Two sequential writes, branch first, so a reader can only ever
    /// observe an unreferenced branch, never a `branch_ids` entry that
    /// points at nothing.
    pub async fn create_conversation(&self, model: &str) -> Result<(Conversation, Branch)> {
        let mut conversation = Conversation::new();
        let branch = Branch::first(&conversation.id, model);
        conversation.branch_ids.push(branch.id.clone());

        self.branches.create(&branch).await?;
        self.conversations.create(&conversation).await?;

        tracing::info!(
            conversation_id = %conversation.id,
            branch_id = %branch.id,
            "conversation created"
        );

        Ok((conversation, branch))
    }

    pub async fn export_data(&self) -> Result<ExportData> {
        Ok(ExportData {
            conversations: self.store.list_all(SortOrder::Ascending).await?,
            branches: self.store.list_all(SortOrder::Ascending).await?,
            messages: self.store.list_all(SortOrder::Ascending).await?,
        })
    }

    pub async fn import_data(&self, data: ExportData) -> Result<()> {
        for conversation in &data.conversations {
            self.store.put(conversation).await?;
        }
        for branch in &data.branches {
            self.store.put(branch).await?;
        }
        for message in &data.messages {
            self.store.put(message).await?;
        }
        Ok(())
    }

    /// Wipe everything. Used for reset and testing.
    pub async fn clear_all(&self) -> Result<()> {
        self.store.clear_all().await
    }
}
