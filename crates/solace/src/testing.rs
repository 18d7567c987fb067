//! Test utilities for solace - deterministic provider stand-ins
//!
//! These doubles let the memory store and reply pipeline be tested without
//! model downloads or network calls.

use async_trait::async_trait;

use crate::error::{Result, SolaceError};
use crate::providers::{EMBEDDING_DIMENSION, EmbeddingProvider, GenerationProvider};

/// Mock embedding provider for fast unit tests that don't need real ML.
/// Produces deterministic 384-dimensional vectors based on input text hash.
#[derive(Debug, Clone, Default)]
pub struct MockEmbedder;

impl MockEmbedder {
    pub fn new() -> Self {
        Self
    }

    /// Generate a deterministic "embedding" from text using hashing.
    /// Returns a 384-dim vector (matching real model dimensions) in range [-1, 1].
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        (0..EMBEDDING_DIMENSION)
            .map(|i| {
                // Seed + index gives pseudo-random but deterministic values
                let x = seed
                    .wrapping_mul(i as u64 + 1)
                    .wrapping_add(0x9e3779b97f4a7c15);
                let normalized = (x as f32) / (u64::MAX as f32);
                (normalized * 2.0) - 1.0 // Range [-1, 1]
            })
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Generation provider that always returns the same reply
#[derive(Debug, Clone)]
pub struct CannedGenerator {
    reply: String,
}

impl CannedGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl GenerationProvider for CannedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.reply.clone())
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

/// Generation provider that always fails, for fallback-path tests
#[derive(Debug, Clone, Default)]
pub struct FailingGenerator;

impl FailingGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GenerationProvider for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(SolaceError::Generation("provider is down".to_string()))
    }

    async fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
