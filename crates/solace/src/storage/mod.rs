//! Persistence layer for ledger blobs
//!
//! The memory store serializes one ledger per user and hands it to a keyed
//! blob store. Backends must guarantee atomic writes: a concurrent reader
//! never observes a partially written blob.

use async_trait::async_trait;

use crate::error::Result;

pub mod file;

pub use file::FileBlobStore;

/// Per-user keyed byte-blob store with atomic write semantics
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the blob for a key, or `None` if nothing was ever written
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically replace the blob for a key
    async fn write(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
