use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Solace
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Ledger storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Embedding model configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Reply generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Ledger storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base directory for all persisted ledgers
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".solace"))
        .unwrap_or_else(|| PathBuf::from(".solace"))
}

/// Embedding model configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EmbeddingConfig {
    /// Directory for cached model files (fastembed default when unset)
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Show a progress bar while downloading the model
    #[serde(default)]
    pub show_download_progress: bool,
}

/// Reply generation configuration for OpenAI-compatible APIs
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// API endpoint URL
    #[serde(default = "default_generation_api_url")]
    pub api_url: String,
    /// Environment variable name for the API key
    #[serde(default = "default_generation_api_key_env")]
    pub api_key_env: String,
    /// Model identifier for the remote API
    #[serde(default = "default_generation_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_generation_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_url: default_generation_api_url(),
            api_key_env: default_generation_api_key_env(),
            model: default_generation_model(),
            timeout_secs: default_generation_timeout_secs(),
        }
    }
}

fn default_generation_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_generation_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_generation_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_generation_timeout_secs() -> u64 {
    30
}
