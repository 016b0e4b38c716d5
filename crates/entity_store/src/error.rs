//! Entity store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The persistence backend cannot be used (restrictive environment,
    /// missing permissions, quota denial). Reported before any mutating
    /// operation is attempted, never silently swallowed.
    #[error("Storage backend is unavailable")]
    Unavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Schema migration to version {version} failed: {reason}")]
    Migration { version: u32, reason: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
