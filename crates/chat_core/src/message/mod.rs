//! Message types and content composition.

mod compose;

pub use compose::compose_with_references;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::branch::ForkOrigin;
use crate::ids::generate_id;

/// Who authored a message turn.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single turn in a branch.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Message {
    pub id: String,

    /// The owning branch.
    pub branch_id: String,

    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,

    /// Branch-provenance: the branch this message's content was forked
    /// from. Set together with the other two provenance fields, and only
    /// on the first message of a forked branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_source_branch_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_source_message_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_selected_text: Option<String>,
}

impl Message {
    pub fn new(branch_id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            branch_id: branch_id.into(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            branch_source_branch_id: None,
            branch_source_message_id: None,
            branch_selected_text: None,
        }
    }

    pub fn user(branch_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(branch_id, Role::User, content)
    }

    pub fn assistant(branch_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(branch_id, Role::Assistant, content)
    }

    /// Attach fork provenance. All three fields are stamped as one unit.
    pub fn with_fork_origin(mut self, origin: &ForkOrigin) -> Self {
        self.branch_source_branch_id = Some(origin.source_branch_id.clone());
        self.branch_source_message_id = Some(origin.source_message_id.clone());
        self.branch_selected_text = Some(origin.selected_text.clone());
        self
    }

    pub fn has_fork_provenance(&self) -> bool {
        self.branch_source_branch_id.is_some()
    }
}
