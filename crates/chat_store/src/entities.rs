//! Table bindings for the core entity types.

use chat_core::{Branch, Conversation, Message};
use entity_store::{IndexField, Persisted, Table};

impl Persisted for Conversation {
    const TABLE: Table = Table::Conversations;

    fn id(&self) -> &str {
        &self.id
    }

    fn index_value(&self, _field: IndexField) -> Option<&str> {
        None
    }

    fn order_key(&self) -> i64 {
        self.updated_at.timestamp_millis()
    }
}

impl Persisted for Branch {
    const TABLE: Table = Table::Branches;

    fn id(&self) -> &str {
        &self.id
    }

    fn index_value(&self, field: IndexField) -> Option<&str> {
        match field {
            IndexField::ConversationId => Some(&self.conversation_id),
            IndexField::BranchId => None,
        }
    }

    fn order_key(&self) -> i64 {
        i64::from(self.position)
    }
}

impl Persisted for Message {
    const TABLE: Table = Table::Messages;

    fn id(&self) -> &str {
        &self.id
    }

    fn index_value(&self, field: IndexField) -> Option<&str> {
        match field {
            IndexField::BranchId => Some(&self.branch_id),
            IndexField::ConversationId => None,
        }
    }

    fn order_key(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}
