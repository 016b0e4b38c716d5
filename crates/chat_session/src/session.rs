//! Per-branch session controller.

use std::sync::Arc;

use chat_core::{compose_with_references, Branch, Message};
use chat_store::{BranchPatch, ChatStore, ConversationPatch};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::completion::{ChatTurn, CompletionService};
use crate::error::{Result, SessionError};
use crate::state::SessionState;
use crate::title;

/// Live updates surfaced to the view layer while a send is in flight.
#[derive(Debug, Clone)]
pub enum SessionUpdate {
    /// The outgoing user message was persisted.
    UserMessage(Message),
    /// One streamed chunk of the in-progress assistant response. The
    /// accumulated buffer is transient and not yet persisted.
    StreamChunk { delta: String },
    /// The completed assistant message was persisted.
    AssistantMessage(Message),
    /// The stream was cancelled; the partial buffer was discarded.
    StreamCancelled,
    /// An auto-generated conversation title was persisted.
    TitleGenerated {
        conversation_id: String,
        title: String,
    },
}

/// How a send finished. Cancellation is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    Cancelled,
}

/// Controls the message flow of one branch.
///
/// Sessions on different branches are fully independent and may stream
/// concurrently; there is no cross-branch locking. Within a branch the
/// persistence order is strict: the user message is durably written
/// before streaming begins, and the assistant message only after the
/// full stream completed.
pub struct ChatSession {
    store: ChatStore,
    service: Arc<dyn CompletionService>,
    branch_id: String,
    state: SessionState,
    updates: mpsc::Sender<SessionUpdate>,
}

impl ChatSession {
    pub fn new(
        store: ChatStore,
        service: Arc<dyn CompletionService>,
        branch_id: impl Into<String>,
        updates: mpsc::Sender<SessionUpdate>,
    ) -> Self {
        Self {
            store,
            service,
            branch_id: branch_id.into(),
            state: SessionState::Idle,
            updates,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    /// Persist a branch-local model choice.
    pub async fn set_model(&self, model: &str) -> Result<()> {
        self.store
            .branches
            .update(
                &self.branch_id,
                BranchPatch {
                    model: Some(model.to_string()),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }

    /// Send a user message and stream the assistant's reply.
    ///
    /// Queued `mentioned_texts` are folded in ahead of the typed content
    /// and cleared in the same branch update. The first message of a
    /// forked branch carries the fork provenance. The cancellation token
    /// is honored at every chunk boundary; on cancellation the partial
    /// buffer is discarded and nothing further is persisted.
    pub async fn send_message(
        &mut self,
        content: &str,
        cancel: CancellationToken,
    ) -> Result<SessionOutcome> {
        let mut branch = self
            .store
            .branches
            .get(&self.branch_id)
            .await?
            .ok_or_else(|| SessionError::UnknownBranch(self.branch_id.clone()))?;

        let is_first_message = branch.messages.is_empty();

        let full_content = compose_with_references(&branch.mentioned_texts, content);
        let mut user_message = Message::user(&branch.id, full_content);
        if is_first_message {
            if let Some(origin) = &branch.fork_origin {
                user_message = user_message.with_fork_origin(origin);
            }
        }

        branch.messages.push(user_message.clone());
        branch.mentioned_texts.clear();

        // Message record first, so a mid-failure never loses it.
        self.store.messages.create(&user_message).await?;
        self.store
            .branches
            .update(
                &branch.id,
                BranchPatch {
                    messages: Some(branch.messages.clone()),
                    mentioned_texts: Some(Vec::new()),
                    ..Default::default()
                },
            )
            .await?;

        let _ = self
            .updates
            .send(SessionUpdate::UserMessage(user_message.clone()))
            .await;

        if is_first_message && branch.position == 0 {
            self.spawn_title_generation(&branch.conversation_id, user_message.content.clone())
                .await;
        }

        self.state = SessionState::Streaming;
        tracing::debug!(branch_id = %branch.id, "session streaming");

        let outcome = self.stream_assistant_reply(&mut branch, cancel).await;

        self.state = SessionState::Idle;
        tracing::debug!(branch_id = %branch.id, outcome = ?outcome, "session idle");

        outcome
    }

    async fn stream_assistant_reply(
        &self,
        branch: &mut Branch,
        cancel: CancellationToken,
    ) -> Result<SessionOutcome> {
        let turns: Vec<ChatTurn> = branch.messages.iter().map(ChatTurn::from).collect();

        let mut stream = self
            .service
            .stream_complete(&branch.model, &turns)
            .await
            .map_err(|error| SessionError::StreamFailed(error.to_string()))?;

        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            if cancel.is_cancelled() {
                tracing::debug!(branch_id = %branch.id, "stream cancelled, buffer discarded");
                let _ = self.updates.send(SessionUpdate::StreamCancelled).await;
                return Ok(SessionOutcome::Cancelled);
            }

            match chunk {
                Ok(delta) => {
                    buffer.push_str(&delta);
                    let _ = self.updates.send(SessionUpdate::StreamChunk { delta }).await;
                }
                Err(error) => {
                    tracing::warn!(branch_id = %branch.id, %error, "stream failed");
                    return Err(SessionError::StreamFailed(error.to_string()));
                }
            }
        }

        if cancel.is_cancelled() {
            let _ = self.updates.send(SessionUpdate::StreamCancelled).await;
            return Ok(SessionOutcome::Cancelled);
        }

        let assistant_message = Message::assistant(&branch.id, buffer);
        branch.messages.push(assistant_message.clone());

        self.store.messages.create(&assistant_message).await?;
        self.store
            .branches
            .update(
                &branch.id,
                BranchPatch {
                    messages: Some(branch.messages.clone()),
                    ..Default::default()
                },
            )
            .await?;

        let _ = self
            .updates
            .send(SessionUpdate::AssistantMessage(assistant_message))
            .await;

        Ok(SessionOutcome::Completed)
    }

    /// Fire-and-forget auto-titling after the first exchange. Every
    /// failure in here is swallowed: an untitled conversation is the
    /// fallback, never a user-facing error.
    async fn spawn_title_generation(&self, conversation_id: &str, user_content: String) {
        let conversation = match self.store.conversations.get(conversation_id).await {
            Ok(Some(conversation)) => conversation,
            Ok(None) => return,
            Err(error) => {
                tracing::debug!(%error, "skipping title generation");
                return;
            }
        };
        if conversation.name.is_some() {
            return;
        }

        let service = Arc::clone(&self.service);
        let store = self.store.clone();
        let updates = self.updates.clone();
        let conversation_id = conversation_id.to_string();

        tokio::spawn(async move {
            let Some(generated) = title::generate_title(service.as_ref(), &user_content).await
            else {
                return;
            };

            let result = store
                .conversations
                .update(
                    &conversation_id,
                    ConversationPatch {
                        name: Some(generated.clone()),
                        ..Default::default()
                    },
                )
                .await;

            match result {
                Ok(()) => {
                    let _ = updates
                        .send(SessionUpdate::TitleGenerated {
                            conversation_id,
                            title: generated,
                        })
                        .await;
                }
                Err(error) => {
                    tracing::debug!(%error, "failed to persist generated title");
                }
            }
        });
    }
}
