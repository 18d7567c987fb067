//! File-backed blob store, one file per key
//!
//! Writes go to a sibling temp file first and are moved into place with
//! `fs::rename`, so readers only ever see a complete blob.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{Result, SolaceError};
use crate::storage::BlobStore;

/// Blob store persisting each key as `<root>/ledgers/<key>.json`
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Create a new file-backed store rooted at the given data directory
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let root = data_dir.as_ref().join("ledgers");
        std::fs::create_dir_all(&root)?;
        info!("initialized file blob store (root={})", root.display());
        Ok(Self { root })
    }

    /// Path to the blob file for a key
    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Path to the temporary file used during a write
    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json.tmp"))
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path).map_err(|e| {
            SolaceError::StorageRead(format!("failed to read {}: {e}", path.display()))
        })?;
        Ok(Some(bytes))
    }

    async fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.blob_path(key);
        let temp_path = self.temp_path(key);

        std::fs::write(&temp_path, bytes).map_err(|e| {
            SolaceError::StorageWrite(format!("failed to write {}: {e}", temp_path.display()))
        })?;
        std::fs::rename(&temp_path, &path).map_err(|e| {
            SolaceError::StorageWrite(format!(
                "failed to move {} into place: {e}",
                temp_path.display()
            ))
        })?;

        debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_absent_key_returns_none() {
        let dir = tempdir().unwrap();
        let store = FileBlobStore::new(dir.path()).unwrap();

        let result = store.read("nobody").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileBlobStore::new(dir.path()).unwrap();

        store.write("alice", b"hello ledger").await.unwrap();

        let bytes = store.read("alice").await.unwrap();
        assert_eq!(bytes.as_deref(), Some(b"hello ledger".as_slice()));
    }

    #[tokio::test]
    async fn test_write_replaces_previous_blob() {
        let dir = tempdir().unwrap();
        let store = FileBlobStore::new(dir.path()).unwrap();

        store.write("alice", b"old").await.unwrap();
        store.write("alice", b"new").await.unwrap();

        let bytes = store.read("alice").await.unwrap();
        assert_eq!(bytes.as_deref(), Some(b"new".as_slice()));
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let dir = tempdir().unwrap();
        let store = FileBlobStore::new(dir.path()).unwrap();

        store.write("alice", b"a").await.unwrap();
        store.write("bob", b"b").await.unwrap();

        assert_eq!(store.read("alice").await.unwrap().as_deref(), Some(b"a".as_slice()));
        assert_eq!(store.read("bob").await.unwrap().as_deref(), Some(b"b".as_slice()));
    }

    #[tokio::test]
    async fn test_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = FileBlobStore::new(dir.path()).unwrap();

        store.write("alice", b"payload").await.unwrap();

        assert!(store.blob_path("alice").exists());
        assert!(!store.temp_path("alice").exists());
    }

    #[tokio::test]
    async fn test_store_survives_reopen() {
        let dir = tempdir().unwrap();

        {
            let store = FileBlobStore::new(dir.path()).unwrap();
            store.write("alice", b"durable").await.unwrap();
        }

        let store = FileBlobStore::new(dir.path()).unwrap();
        let bytes = store.read("alice").await.unwrap();
        assert_eq!(bytes.as_deref(), Some(b"durable".as_slice()));
    }
}
