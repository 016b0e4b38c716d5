//! In-memory storage backend

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::backend::StorageBackend;
use crate::error::{Result, StoreError};
use crate::table::Table;

/// Non-durable backend used as the dependency-injection substitute in
/// tests. `set_available(false)` simulates a restricted engine.
#[derive(Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<Table, Vec<Value>>>,
    version: RwLock<Option<u32>>,
    unavailable: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn read_table(&self, table: Table) -> Result<Vec<Value>> {
        let tables = self.tables.read().await;
        Ok(tables.get(&table).cloned().unwrap_or_default())
    }

    async fn write_table(&self, table: Table, rows: Vec<Value>) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }

        let mut tables = self.tables.write().await;
        tables.insert(table, rows);
        Ok(())
    }

    async fn schema_version(&self) -> Result<Option<u32>> {
        Ok(*self.version.read().await)
    }

    async fn set_schema_version(&self, version: u32) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }

        *self.version.write().await = Some(version);
        Ok(())
    }

    async fn is_available(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }

    async fn clear_all(&self) -> Result<()> {
        self.tables.write().await.clear();
        *self.version.write().await = None;
        Ok(())
    }
}
