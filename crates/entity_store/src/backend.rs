//! Storage backend trait

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::table::Table;

/// The storage engine beneath the entity store.
///
/// A backend persists each table as an ordered list of raw JSON rows. The
/// typed operations, index scans and schema migrations are layered on top
/// by [`crate::EntityStore`], so an engine only has to move whole tables
/// in and out durably.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Load all rows of a table. A table that was never written is empty.
    async fn read_table(&self, table: Table) -> Result<Vec<Value>>;

    /// Replace all rows of a table.
    async fn write_table(&self, table: Table, rows: Vec<Value>) -> Result<()>;

    /// The persisted schema-version marker, if one was ever written.
    async fn schema_version(&self) -> Result<Option<u32>>;

    /// Persist the schema-version marker.
    async fn set_schema_version(&self, version: u32) -> Result<()>;

    /// Availability probe. Callers must check this before offering
    /// mutating actions; every write fails with
    /// [`crate::StoreError::Unavailable`] when it returns false.
    async fn is_available(&self) -> bool;

    /// Wipe all tables and the schema-version marker.
    async fn clear_all(&self) -> Result<()>;
}
