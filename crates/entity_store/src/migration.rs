//! Versioned schema migration ladder.
//!
//! Each version bump supplies a pure transform from old-shaped rows to
//! new-shaped rows. The run loads every table up front, applies the whole
//! ladder in memory, and writes nothing back unless every transform
//! succeeded, so no partial migration state is ever persisted. The
//! schema-version marker is bumped last.

use std::collections::HashMap;

use serde_json::Value;

use crate::backend::StorageBackend;
use crate::error::{Result, StoreError};
use crate::table::Table;

/// Schema version the code expects.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// One rung of the ladder: upgrades the store to `to_version`.
pub struct MigrationStep {
    pub to_version: u32,
    /// Pure per-table transform on raw rows.
    pub transform: fn(Table, Vec<Value>) -> std::result::Result<Vec<Value>, String>,
}

/// The full ladder, ascending by version.
pub fn ladder() -> Vec<MigrationStep> {
    vec![MigrationStep {
        to_version: 2,
        transform: fold_initial_input_into_mentioned_texts,
    }]
}

/// Run all pending migrations. Called once when the store opens.
pub async fn run(backend: &dyn StorageBackend) -> Result<()> {
    run_steps(backend, &ladder()).await
}

pub(crate) async fn run_steps(
    backend: &dyn StorageBackend,
    steps: &[MigrationStep],
) -> Result<()> {
    if !backend.is_available().await {
        // Nothing can be written anyway; the caller will surface
        // unavailability on the first mutating operation.
        tracing::warn!("storage unavailable, skipping schema migration");
        return Ok(());
    }

    let target = steps
        .iter()
        .map(|step| step.to_version)
        .max()
        .unwrap_or(CURRENT_SCHEMA_VERSION);

    let mut version = match backend.schema_version().await? {
        Some(version) => version,
        None => {
            let mut has_data = false;
            for table in Table::ALL {
                if !backend.read_table(table).await?.is_empty() {
                    has_data = true;
                    break;
                }
            }

            if !has_data {
                // Fresh store: stamp the marker, nothing to transform.
                backend.set_schema_version(target).await?;
                return Ok(());
            }

            // Stores written before the marker existed are version 1.
            1
        }
    };

    if version >= target {
        return Ok(());
    }

    tracing::info!(from = version, to = target, "running schema migration");

    let mut tables: HashMap<Table, Vec<Value>> = HashMap::new();
    for table in Table::ALL {
        tables.insert(table, backend.read_table(table).await?);
    }

    let start_version = version;
    for step in steps.iter().filter(|step| step.to_version > start_version) {
        for table in Table::ALL {
            let rows = tables.remove(&table).unwrap_or_default();
            let transformed = (step.transform)(table, rows).map_err(|reason| {
                StoreError::Migration {
                    version: step.to_version,
                    reason,
                }
            })?;
            tables.insert(table, transformed);
        }
        version = step.to_version;
    }

    for (table, rows) in tables {
        backend.write_table(table, rows).await?;
    }
    backend.set_schema_version(version).await?;

    Ok(())
}

/// v1 -> v2: the legacy branch field `initial_input` (a single prefilled
/// text) becomes the head of the `mentioned_texts` queue.
fn fold_initial_input_into_mentioned_texts(
    table: Table,
    rows: Vec<Value>,
) -> std::result::Result<Vec<Value>, String> {
    if table != Table::Branches {
        return Ok(rows);
    }

    rows.into_iter()
        .map(|mut row| {
            let obj = row
                .as_object_mut()
                .ok_or_else(|| "branch row is not an object".to_string())?;

            if let Some(initial) = obj.remove("initial_input") {
                if let Some(text) = initial.as_str().filter(|text| !text.is_empty()) {
                    let mentioned = obj
                        .entry("mentioned_texts")
                        .or_insert_with(|| Value::Array(Vec::new()));
                    let texts = mentioned
                        .as_array_mut()
                        .ok_or_else(|| "mentioned_texts is not an array".to_string())?;
                    texts.insert(0, Value::String(text.to_string()));
                }
            }

            Ok(row)
        })
        .collect()
}
