//! Per-user bounded memory store
//!
//! Owns loading, mutating, and persisting one ledger per user. Appends for
//! the same user are serialized through a keyed lock table; reads go straight
//! to the blob store, whose atomic writes guarantee non-torn snapshots.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{Result, SolaceError};
use crate::memory::types::{MemoryLedger, MemoryRecord};
use crate::memory::user::UserId;
use crate::providers::EmbeddingProvider;
use crate::storage::BlobStore;

/// Bounded, persisted ledger store keyed by user id
pub struct MemoryStore {
    blobs: Arc<dyn BlobStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl MemoryStore {
    /// Create a store over the given persistence backend and embedder
    pub fn new(blobs: Arc<dyn BlobStore>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            blobs,
            embedder,
            locks: DashMap::new(),
        }
    }

    /// The mutation lock for one user's ledger
    fn user_lock(&self, user_id: &UserId) -> Arc<Mutex<()>> {
        self.locks
            .entry(user_id.as_str().to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Read and decode the persisted ledger, surfacing corruption
    async fn read_ledger(&self, user_id: &UserId) -> Result<MemoryLedger> {
        match self.blobs.read(user_id.as_str()).await? {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                SolaceError::StorageRead(format!("corrupt ledger for {user_id}: {e}"))
            }),
            None => Ok(MemoryLedger::new()),
        }
    }

    /// Load a user's ledger, or an empty one if nothing readable is persisted
    ///
    /// An unreadable or corrupt ledger is logged and treated as empty rather
    /// than failing the request.
    pub async fn load(&self, user_id: &UserId) -> MemoryLedger {
        match self.read_ledger(user_id).await {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!("failed to load ledger for {user_id}, starting empty: {e}");
                MemoryLedger::new()
            }
        }
    }

    /// Embed a journal entry and persist it into the user's ledger
    ///
    /// The embedding happens before the per-user lock is taken, so a slow
    /// provider never blocks other appends for the same user longer than the
    /// load-mutate-persist sequence itself. Embedding and persist failures
    /// propagate; no partial state is left behind in either case.
    pub async fn append(&self, user_id: &UserId, text: &str) -> Result<()> {
        let vector = self.embedder.embed(text).await?;
        let record = MemoryRecord::new(text.to_string(), vector);

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let mut ledger = self.load(user_id).await;
        let evicted = ledger.push(record);
        if evicted > 0 {
            debug!("evicted {evicted} oldest record(s) for {user_id}");
        }

        let bytes = serde_json::to_vec(&ledger)
            .map_err(|e| SolaceError::StorageWrite(format!("ledger encoding failed: {e}")))?;
        self.blobs.write(user_id.as_str(), &bytes).await?;

        debug!("indexed entry for {user_id} (ledger size {})", ledger.len());
        Ok(())
    }

    /// The most recently appended record for a user, if any
    pub async fn latest(&self, user_id: &UserId) -> Option<MemoryRecord> {
        let ledger = self.load(user_id).await;
        ledger.latest().cloned()
    }

    /// The user's full ledger, oldest first
    pub async fn all(&self, user_id: &UserId) -> Vec<MemoryRecord> {
        let ledger = self.load(user_id).await;
        ledger.records().to_vec()
    }
}
