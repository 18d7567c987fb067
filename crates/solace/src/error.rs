//! Error types for Solace

use thiserror::Error;

/// Main error type for Solace operations
#[derive(Error, Debug)]
pub enum SolaceError {
    /// Embedding provider unavailable or returned a malformed response
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Persisted ledger exists but could not be read or parsed
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// Ledger persist step failed; the entry was not indexed
    #[error("Storage write error: {0}")]
    StorageWrite(String),

    /// Generation provider failed or timed out
    #[error("Generation error: {0}")]
    Generation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Solace operations
pub type Result<T> = std::result::Result<T, SolaceError>;
