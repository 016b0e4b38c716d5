//! The branching algorithm.

use chat_core::{Branch, ForkOrigin};
use chat_store::{ChatStore, ConversationPatch};

use crate::error::{ForkError, Result};

/// The fork point: which message of which branch the text was selected in.
#[derive(Debug, Clone)]
pub struct ForkSource {
    pub source_branch_id: String,
    pub source_message_id: String,
    pub selected_text: String,
}

#[derive(Clone)]
pub struct ForkEngine {
    store: ChatStore,
}

impl ForkEngine {
    pub fn new(store: ChatStore) -> Self {
        Self { store }
    }

    /// Branch-to-new: create a sibling branch seeded with the selection.
    ///
    /// The new branch inherits the source branch's model, takes the next
    /// free position, and starts with NO messages — the selected text is
    /// queued in `mentioned_texts` to be folded into the next outgoing
    /// message, and the fork point is recorded in `fork_origin`. The
    /// branch record is persisted before the conversation's `branch_ids`
    /// is rewritten to reference it.
    pub async fn fork_to_new_branch(
        &self,
        conversation_id: &str,
        source: ForkSource,
    ) -> Result<Branch> {
        if source.selected_text.trim().is_empty() {
            return Err(ForkError::EmptySelection);
        }

        let conversation = self
            .store
            .conversations
            .get(conversation_id)
            .await?
            .ok_or_else(|| ForkError::UnknownConversation(conversation_id.to_string()))?;
        let source_branch = self
            .store
            .branches
            .get(&source.source_branch_id)
            .await?
            .ok_or_else(|| ForkError::UnknownBranch(source.source_branch_id.clone()))?;

        let siblings = self.store.branches.list_by_conversation(conversation_id).await?;

        let mut branch = Branch::new(conversation_id, &source_branch.model, siblings.len() as u32);
        branch.mentioned_texts = vec![source.selected_text.clone()];
        branch.fork_origin = Some(ForkOrigin {
            source_branch_id: source.source_branch_id.clone(),
            source_message_id: source.source_message_id.clone(),
            selected_text: source.selected_text,
        });

        self.store.branches.create(&branch).await?;

        let mut branch_ids = conversation.branch_ids;
        branch_ids.push(branch.id.clone());
        self.store
            .conversations
            .update(
                conversation_id,
                ConversationPatch {
                    branch_ids: Some(branch_ids),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(
            conversation_id,
            branch_id = %branch.id,
            source_branch_id = %source.source_branch_id,
            position = branch.position,
            "branch forked"
        );

        Ok(branch)
    }

    /// Branch-to-existing: queue the selection on an existing branch.
    ///
    /// Additive — repeated calls accumulate references until the next
    /// outgoing message consumes them. No new branch is created and the
    /// conversation's `branch_ids` is untouched.
    pub async fn fork_to_existing_branch(
        &self,
        target_branch_id: &str,
        selected_text: &str,
    ) -> Result<()> {
        if selected_text.trim().is_empty() {
            return Err(ForkError::EmptySelection);
        }

        let branch = self
            .store
            .branches
            .get(target_branch_id)
            .await?
            .ok_or_else(|| ForkError::UnknownBranch(target_branch_id.to_string()))?;

        let mut mentioned_texts = branch.mentioned_texts;
        mentioned_texts.push(selected_text.to_string());
        self.store
            .branches
            .update(
                target_branch_id,
                chat_store::BranchPatch {
                    mentioned_texts: Some(mentioned_texts),
                    ..Default::default()
                },
            )
            .await?;

        tracing::debug!(branch_id = target_branch_id, "reference queued on branch");

        Ok(())
    }

    /// Delete a branch, repack the surviving siblings to `0..n-1`, and
    /// rewrite the conversation's `branch_ids`.
    ///
    /// Refuses to delete the last remaining branch or the primary
    /// (`position == 0`) branch; those only go with the conversation.
    pub async fn remove_branch(&self, branch_id: &str) -> Result<()> {
        let branch = self
            .store
            .branches
            .get(branch_id)
            .await?
            .ok_or_else(|| ForkError::UnknownBranch(branch_id.to_string()))?;

        let siblings = self
            .store
            .branches
            .list_by_conversation(&branch.conversation_id)
            .await?;
        if siblings.len() <= 1 {
            return Err(ForkError::LastBranch);
        }
        if branch.position == 0 {
            return Err(ForkError::FirstBranchProtected);
        }

        self.store.branches.delete(branch_id).await?;

        let repacked = self
            .store
            .branches
            .repack_positions(&branch.conversation_id)
            .await?;
        let branch_ids = repacked.iter().map(|sibling| sibling.id.clone()).collect();
        self.store
            .conversations
            .update(
                &branch.conversation_id,
                ConversationPatch {
                    branch_ids: Some(branch_ids),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(
            conversation_id = %branch.conversation_id,
            branch_id,
            "branch removed"
        );

        Ok(())
    }
}
