//! JSON File Store - Atomic Collection Snapshot Persistence
//!
//! Persists a collection as a pretty-printed JSON array in a dedicated
//! file (`lenders.json` / `quotes.json`) using atomic writes (write to a
//! tmp file, then rename). The file is always either the old or the new
//! snapshot, never a partial write, and stays human-readable and editable.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::record::{CollectionKind, Record};
use crate::ports::snapshot::SnapshotStore;

/// Atomic JSON snapshot store for one collection.
pub struct JsonFileStore {
    /// Which collection this file backs (names the file).
    kind: CollectionKind,
    /// Path to the snapshot file.
    path: PathBuf,
    /// Temporary path for atomic writes.
    tmp_path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for `kind` inside `data_dir`.
    ///
    /// Creates the directory if it doesn't exist.
    pub async fn new(data_dir: &Path, kind: CollectionKind) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .await
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let path = data_dir.join(kind.file_name());
        let tmp_path = data_dir.join(format!("{}.tmp", kind.file_name()));
        Ok(Self {
            kind,
            path,
            tmp_path,
        })
    }

    /// Path of the backing file (exposed for logs and tests).
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Vec<Record>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let records: Vec<Record> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        Ok(Some(records))
    }

    async fn save(&self, records: &[Record]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .with_context(|| format!("Failed to serialize {} snapshot", self.kind))?;

        // Write to tmp file, then atomic rename
        fs::write(&self.tmp_path, &json)
            .await
            .with_context(|| format!("Failed to write {}", self.tmp_path.display()))?;

        fs::rename(&self.tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to rename into {}", self.path.display()))?;

        debug!(
            collection = %self.kind,
            path = %self.path.display(),
            count = records.len(),
            "Snapshot written"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(id: i64, name: &str) -> Record {
        let mut fields = serde_json::Map::new();
        fields.insert("name".to_string(), json!(name));
        Record::new(id, fields)
    }

    #[tokio::test]
    async fn test_load_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path(), CollectionKind::Lenders)
            .await
            .unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path(), CollectionKind::Lenders)
            .await
            .unwrap();

        let records = vec![record(1, "Acme"), record(2, "Bravo")];
        store.save(&records).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, records);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_snapshot_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path(), CollectionKind::Quotes)
            .await
            .unwrap();
        store.save(&[record(9, "A")]).await.unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("[\n"));
        assert!(text.contains("\n    \"id\": 9"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path(), CollectionKind::Lenders)
            .await
            .unwrap();
        std::fs::write(store.path(), "not json at all").unwrap();
        assert!(store.load().await.is_err());
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path(), CollectionKind::Lenders)
            .await
            .unwrap();
        store.save(&[record(1, "a"), record(2, "b")]).await.unwrap();
        store.save(&[record(3, "c")]).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, vec![record(3, "c")]);
    }
}
