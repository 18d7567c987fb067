//! Provider ports for the external AI collaborators
//!
//! Embedding and generation are capability-abstracted so the core can be
//! exercised with deterministic stand-ins instead of live network calls.

pub mod embedding;
pub mod generation;

pub use embedding::{EMBEDDING_DIMENSION, EmbeddingProvider, LocalEmbedder};
pub use generation::{GenerationProvider, RemoteGenerator};
