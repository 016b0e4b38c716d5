//! Typed entity operations over a storage backend.

use std::sync::Arc;

use serde_json::Value;

use crate::backend::StorageBackend;
use crate::entity::Persisted;
use crate::error::{Result, StoreError};
use crate::migration;
use crate::table::{IndexField, SortOrder};

/// Typed get/put/delete/query operations over an injected backend.
///
/// The backend instance is an explicit constructor argument so tests can
/// substitute [`crate::MemoryBackend`] for the file-backed engine.
#[derive(Clone)]
pub struct EntityStore {
    backend: Arc<dyn StorageBackend>,
}

impl EntityStore {
    /// Open a store over a backend, running any pending schema migrations.
    ///
    /// When the backend is unavailable the migration pass is skipped; the
    /// store still opens so callers can probe availability and report it.
    pub async fn open(backend: Arc<dyn StorageBackend>) -> Result<Self> {
        migration::run(backend.as_ref()).await?;
        Ok(Self { backend })
    }

    /// A store without the migration pass.
    pub fn with_backend(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Availability probe of the underlying engine.
    pub async fn is_available(&self) -> bool {
        self.backend.is_available().await
    }

    async fn ensure_available(&self) -> Result<()> {
        if self.backend.is_available().await {
            Ok(())
        } else {
            Err(StoreError::Unavailable)
        }
    }

    /// Fetch one entity by primary key.
    pub async fn get<T: Persisted>(&self, id: &str) -> Result<Option<T>> {
        let rows = self.backend.read_table(T::TABLE).await?;

        for row in rows {
            if row_id(&row) == Some(id) {
                return Ok(Some(serde_json::from_value(row)?));
            }
        }

        Ok(None)
    }

    /// Insert or overwrite by primary key.
    pub async fn put<T: Persisted>(&self, entity: &T) -> Result<()> {
        self.ensure_available().await?;

        let mut rows = self.backend.read_table(T::TABLE).await?;
        let value = serde_json::to_value(entity)?;

        match rows.iter_mut().find(|row| row_id(row) == Some(entity.id())) {
            Some(row) => *row = value,
            None => rows.push(value),
        }

        tracing::debug!(table = T::TABLE.name(), id = entity.id(), "entity put");
        self.backend.write_table(T::TABLE, rows).await
    }

    /// Delete by primary key. Deleting a missing id is a no-op.
    pub async fn delete<T: Persisted>(&self, id: &str) -> Result<()> {
        self.ensure_available().await?;

        let rows = self.backend.read_table(T::TABLE).await?;
        let remaining: Vec<Value> = rows
            .into_iter()
            .filter(|row| row_id(row) != Some(id))
            .collect();

        tracing::debug!(table = T::TABLE.name(), id, "entity delete");
        self.backend.write_table(T::TABLE, remaining).await
    }

    /// All entities whose index field equals `value`, ascending by the
    /// entity's order key.
    pub async fn query_by_index<T: Persisted>(
        &self,
        field: IndexField,
        value: &str,
    ) -> Result<Vec<T>> {
        let rows = self.backend.read_table(T::TABLE).await?;

        let mut entities = Vec::new();
        for row in rows {
            let entity: T = serde_json::from_value(row)?;
            if entity.index_value(field) == Some(value) {
                entities.push(entity);
            }
        }

        entities.sort_by_key(|entity| entity.order_key());
        Ok(entities)
    }

    /// Full-table scan ordered by the entity's order key.
    pub async fn list_all<T: Persisted>(&self, order: SortOrder) -> Result<Vec<T>> {
        let rows = self.backend.read_table(T::TABLE).await?;

        let mut entities = rows
            .into_iter()
            .map(serde_json::from_value::<T>)
            .collect::<std::result::Result<Vec<T>, _>>()?;

        entities.sort_by_key(|entity| entity.order_key());
        if order == SortOrder::Descending {
            entities.reverse();
        }

        Ok(entities)
    }

    /// Wipe all tables. Used for reset and testing.
    pub async fn clear_all(&self) -> Result<()> {
        self.ensure_available().await?;
        self.backend.clear_all().await
    }
}

fn row_id(row: &Value) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}
