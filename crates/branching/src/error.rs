//! Fork engine error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForkError {
    /// Empty or whitespace-only selections never fork.
    #[error("Selected text is empty")]
    EmptySelection,

    #[error("Conversation not found: {0}")]
    UnknownConversation(String),

    #[error("Branch not found: {0}")]
    UnknownBranch(String),

    /// The `position == 0` branch can only go with its whole conversation.
    #[error("The primary branch cannot be deleted individually")]
    FirstBranchProtected,

    #[error("A conversation must keep at least one branch")]
    LastBranch,

    #[error("Storage error: {0}")]
    Storage(#[from] entity_store::StoreError),
}

pub type Result<T> = std::result::Result<T, ForkError>;
