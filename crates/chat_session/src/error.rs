//! Session controller error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Branch not found: {0}")]
    UnknownBranch(String),

    #[error("Storage error: {0}")]
    Storage(#[from] entity_store::StoreError),

    /// Network or backend failure during streaming. The partial buffer is
    /// discarded and nothing is persisted; this is the user-visible error.
    /// Cancellation is not an error, see [`crate::SessionOutcome`].
    #[error("Completion stream failed: {0}")]
    StreamFailed(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
