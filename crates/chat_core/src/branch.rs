use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::generate_id;
use crate::message::Message;

/// Represents a single, coherent strand of conversation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Branch {
    pub id: String,

    /// The owning conversation.
    pub conversation_id: String,

    /// An ordered list of messages defining the history of this branch.
    /// Append-only under normal operation.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Completion model identifier. A branch-local setting, not global.
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Zero-based order among sibling branches. Siblings of one
    /// conversation always form a contiguous `0..n` sequence.
    pub position: u32,

    /// Referenced texts queued by forking, folded into the next outgoing
    /// message and cleared when it is sent.
    #[serde(default)]
    pub mentioned_texts: Vec<String>,

    /// Where this branch was forked from. Consumed when the first
    /// message is sent, which carries the provenance onto that message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fork_origin: Option<ForkOrigin>,
}

impl Branch {
    pub fn new(conversation_id: impl Into<String>, model: impl Into<String>, position: u32) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            conversation_id: conversation_id.into(),
            messages: Vec::new(),
            model: model.into(),
            title: None,
            created_at: now,
            updated_at: now,
            position,
            mentioned_texts: Vec::new(),
            fork_origin: None,
        }
    }

    /// The primary branch created alongside its conversation.
    pub fn first(conversation_id: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(conversation_id, model, 0)
    }
}

/// The fork point a branch was seeded from.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ForkOrigin {
    /// Branch the selected text was taken from.
    pub source_branch_id: String,
    /// The specific message the text was selected in.
    pub source_message_id: String,
    /// The exact substring that seeded the fork.
    pub selected_text: String,
}
