//! Branch repository

use chat_core::{Branch, Message};
use chrono::Utc;
use entity_store::{EntityStore, IndexField, Result};

use crate::messages::MessageStore;

/// Fields of a branch that can be updated. Omitted fields retain their
/// prior value. Concurrent callers updating disjoint fields (model
/// selection vs. message list) therefore cannot clobber each other.
#[derive(Debug, Clone, Default)]
pub struct BranchPatch {
    pub messages: Option<Vec<Message>>,
    pub model: Option<String>,
    pub title: Option<String>,
    pub position: Option<u32>,
    pub mentioned_texts: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct BranchStore {
    store: EntityStore,
}

impl BranchStore {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, branch: &Branch) -> Result<()> {
        self.store.put(branch).await
    }

    pub async fn get(&self, branch_id: &str) -> Result<Option<Branch>> {
        self.store.get(branch_id).await
    }

    /// Sibling branches of a conversation, ordered by `position`.
    pub async fn list_by_conversation(&self, conversation_id: &str) -> Result<Vec<Branch>> {
        self.store
            .query_by_index(IndexField::ConversationId, conversation_id)
            .await
    }

    /// Partial-field merge. Always stamps `updated_at`. Updating a
    /// missing id is a no-op.
    pub async fn update(&self, branch_id: &str, patch: BranchPatch) -> Result<()> {
        let Some(mut branch) = self.store.get::<Branch>(branch_id).await? else {
            return Ok(());
        };

        if let Some(messages) = patch.messages {
            branch.messages = messages;
        }
        if let Some(model) = patch.model {
            branch.model = model;
        }
        if let Some(title) = patch.title {
            branch.title = Some(title);
        }
        if let Some(position) = patch.position {
            branch.position = position;
        }
        if let Some(mentioned_texts) = patch.mentioned_texts {
            branch.mentioned_texts = mentioned_texts;
        }
        branch.updated_at = Utc::now();

        self.store.put(&branch).await
    }

    /// Delete a branch and all its messages. Cascade only: whether the
    /// owning conversation may lose this branch is the caller's rule.
    pub async fn delete(&self, branch_id: &str) -> Result<()> {
        let messages = MessageStore::new(self.store.clone());

        for message in messages.list_by_branch(branch_id).await? {
            messages.delete(&message.id).await?;
        }

        tracing::debug!(branch_id, "branch deleted");
        self.store.delete::<Branch>(branch_id).await
    }

    /// Rewrite sibling positions to a contiguous `0..n` sequence,
    /// preserving the surviving relative order. Required after any
    /// branch deletion. Returns the repacked siblings.
    pub async fn repack_positions(&self, conversation_id: &str) -> Result<Vec<Branch>> {
        let mut siblings = self.list_by_conversation(conversation_id).await?;

        for (index, branch) in siblings.iter_mut().enumerate() {
            let position = index as u32;
            if branch.position != position {
                branch.position = position;
                branch.updated_at = Utc::now();
                self.store.put(branch).await?;
            }
        }

        Ok(siblings)
    }
}
