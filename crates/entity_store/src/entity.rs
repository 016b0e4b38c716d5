//! The trait connecting entity types to their table.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::table::{IndexField, Table};

/// A record type persisted in one of the entity tables.
///
/// `order_key` is the secondary ordering attribute of the table: branches
/// sort by `position`, messages by `timestamp`, conversations by
/// `updated_at`. Index scans return rows ascending by this key.
pub trait Persisted: Serialize + DeserializeOwned + Clone + Send + Sync {
    const TABLE: Table;

    /// Primary key, opaque and unique within the table.
    fn id(&self) -> &str;

    /// Value of a secondary index field, when the table defines it.
    fn index_value(&self, field: IndexField) -> Option<&str>;

    /// Key used to order index scans and full-table listings.
    fn order_key(&self) -> i64;
}
