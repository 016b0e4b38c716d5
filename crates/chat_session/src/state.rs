//! Session lifecycle states.

use serde::{Deserialize, Serialize};

/// Lifecycle state of one branch's session.
///
/// The machine is `Idle -> Streaming -> Idle`; cancellation and stream
/// failure both return to `Idle` after discarding the partial buffer.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Awaiting user input.
    Idle,
    /// Actively receiving the assistant's streamed response.
    Streaming,
}

impl SessionState {
    pub fn is_streaming(&self) -> bool {
        matches!(self, SessionState::Streaming)
    }
}
