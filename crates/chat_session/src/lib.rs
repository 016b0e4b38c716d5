//! chat_session - The conversation session controller
//!
//! Orchestrates one branch's message flow: composing the outgoing user
//! message (folding queued references), persisting it, consuming the
//! streamed assistant response with cooperative cancellation, persisting
//! the completed reply, and firing auto-titling after the first exchange.
//!
//! - `completion` - the completion-service collaborator contract
//! - `session` - the per-branch controller and its event surface
//! - `state` - session lifecycle states
//! - `title` - auto-title prompt and cleanup

pub mod completion;
pub mod error;
pub mod session;
pub mod state;
pub mod title;

// Re-exports
pub use completion::{ChatTurn, CompletionError, CompletionService, CompletionStream};
pub use error::{Result, SessionError};
pub use session::{ChatSession, SessionOutcome, SessionUpdate};
pub use state::SessionState;
