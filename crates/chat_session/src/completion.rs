//! Completion-service collaborator contract.
//!
//! The upstream completion API is an opaque token-streaming black box;
//! this trait is the seam the session controller consumes it through.

use async_trait::async_trait;
use chat_core::{Message, Role};
use futures::Stream;
use serde::Serialize;
use std::pin::Pin;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Completion backend error: {0}")]
    Backend(String),

    #[error("Stream error: {0}")]
    Stream(String),
}

/// A finite, non-restartable sequence of text chunks. Dropping the stream
/// releases the underlying connection on every exit path.
pub type CompletionStream =
    Pin<Box<dyn Stream<Item = std::result::Result<String, CompletionError>> + Send>>;

/// A single turn in the shape the completion backend expects.
#[derive(Serialize, Debug, Clone)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for ChatTurn {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Stream a chat completion as incremental text chunks.
    async fn stream_complete(
        &self,
        model: &str,
        messages: &[ChatTurn],
    ) -> std::result::Result<CompletionStream, CompletionError>;

    /// Single-shot completion. Used only for title generation.
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatTurn],
    ) -> std::result::Result<String, CompletionError>;
}
