//! Embedding provider port and the local fastembed implementation

use async_trait::async_trait;
use fastembed::{EmbeddingModel as FastEmbedModel, InitOptions, TextEmbedding};
use tokio::sync::Mutex;
use tracing::info;

use crate::config::EmbeddingConfig;
use crate::error::{Result, SolaceError};

/// Embedding dimension of the all-MiniLM-L6-v2 model
pub const EMBEDDING_DIMENSION: usize = 384;

/// Maps text to a fixed-dimension vector
///
/// The dimension is fixed for the lifetime of a deployment; all vectors in
/// a ledger come from the same provider.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Dimension of the vectors this provider produces
    fn dimension(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Local embedding provider backed by fastembed's all-MiniLM-L6-v2
///
/// The fastembed handle requires `&mut self` to embed, so it lives behind a
/// mutex.
pub struct LocalEmbedder {
    model: Mutex<TextEmbedding>,
}

impl LocalEmbedder {
    /// Load the embedding model (downloads it on first run)
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let mut options = InitOptions::new(FastEmbedModel::AllMiniLML6V2)
            .with_show_download_progress(config.show_download_progress);
        if let Some(dir) = &config.cache_dir {
            options = options.with_cache_dir(dir.clone());
        }

        let model = TextEmbedding::try_new(options)
            .map_err(|e| SolaceError::Embedding(e.to_string()))?;

        info!("local embedder initialized (dimension={EMBEDDING_DIMENSION})");
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for LocalEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut model = self.model.lock().await;
        let embeddings = model
            .embed(vec![text.to_string()], None)
            .map_err(|e| SolaceError::Embedding(e.to_string()))?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| SolaceError::Embedding("No embedding returned".to_string()))
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
