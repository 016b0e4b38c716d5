//! File-based storage backend

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::backend::StorageBackend;
use crate::error::Result;
use crate::table::Table;

/// Stores each table as one JSON file inside a data directory.
#[derive(Clone)]
pub struct FileBackend {
    base_path: PathBuf,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn table_path(&self, table: Table) -> PathBuf {
        self.base_path.join(format!("{}.json", table.name()))
    }

    fn version_path(&self) -> PathBuf {
        self.base_path.join("schema_version")
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn read_table(&self, table: Table) -> Result<Vec<Value>> {
        let path = self.table_path(table);

        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path).await?;
        let rows: Vec<Value> = serde_json::from_str(&contents)?;

        Ok(rows)
    }

    async fn write_table(&self, table: Table, rows: Vec<Value>) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;

        let path = self.table_path(table);
        let contents = serde_json::to_string_pretty(&rows)?;

        fs::write(&path, contents).await?;

        Ok(())
    }

    async fn schema_version(&self) -> Result<Option<u32>> {
        let path = self.version_path();

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).await?;
        Ok(contents.trim().parse::<u32>().ok())
    }

    async fn set_schema_version(&self, version: u32) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        fs::write(self.version_path(), version.to_string()).await?;
        Ok(())
    }

    async fn is_available(&self) -> bool {
        // The directory must be creatable and writable. A denied probe
        // write is how quota or permission restrictions show up.
        if fs::create_dir_all(&self.base_path).await.is_err() {
            return false;
        }

        let probe = self.base_path.join(".probe");
        match fs::write(&probe, b"").await {
            Ok(()) => {
                let _ = fs::remove_file(&probe).await;
                true
            }
            Err(_) => false,
        }
    }

    async fn clear_all(&self) -> Result<()> {
        for table in Table::ALL {
            let path = self.table_path(table);
            if path.exists() {
                fs::remove_file(&path).await?;
            }
        }

        let version = self.version_path();
        if version.exists() {
            fs::remove_file(&version).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_missing_table_is_empty() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        let rows = backend.read_table(Table::Conversations).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_write_and_read_table() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        let rows = vec![json!({"id": "a"}), json!({"id": "b"})];
        backend
            .write_table(Table::Branches, rows.clone())
            .await
            .unwrap();

        let loaded = backend.read_table(Table::Branches).await.unwrap();
        assert_eq!(loaded, rows);
    }

    #[tokio::test]
    async fn test_schema_version_round_trip() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        assert_eq!(backend.schema_version().await.unwrap(), None);

        backend.set_schema_version(2).await.unwrap();
        assert_eq!(backend.schema_version().await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_clear_all_removes_tables_and_marker() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        backend
            .write_table(Table::Messages, vec![json!({"id": "m"})])
            .await
            .unwrap();
        backend.set_schema_version(2).await.unwrap();

        backend.clear_all().await.unwrap();

        assert!(backend.read_table(Table::Messages).await.unwrap().is_empty());
        assert_eq!(backend.schema_version().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_probe_succeeds_on_writable_dir() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        assert!(backend.is_available().await);
    }
}
