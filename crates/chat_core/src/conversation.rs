use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::generate_id;

/// Top-level container grouping one or more branches that share a topic.
///
/// `branch_ids` is the display order of the branches. The conversation and
/// its first branch are created together; between the two writes the list
/// may transiently reference a branch the store has not seen yet, so
/// readers must treat the pair as eventually consistent.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Conversation {
    pub id: String,

    /// Ordered list of branch ids, insertion order = display order.
    pub branch_ids: Vec<String>,

    /// User-set or auto-generated from the first exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            branch_ids: Vec::new(),
            name: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
