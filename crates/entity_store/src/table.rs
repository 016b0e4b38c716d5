//! Table and index descriptors for the three entity tables.

use serde::{Deserialize, Serialize};

/// The entity tables of the store.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Conversations,
    Branches,
    Messages,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Conversations, Table::Branches, Table::Messages];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Conversations => "conversations",
            Table::Branches => "branches",
            Table::Messages => "messages",
        }
    }
}

/// Secondary index fields supported by [`crate::EntityStore::query_by_index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexField {
    /// Branches are indexed by their owning conversation.
    ConversationId,
    /// Messages are indexed by their owning branch.
    BranchId,
}

/// Ordering of a full-table scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}
