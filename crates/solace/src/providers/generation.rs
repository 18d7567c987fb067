//! Generation provider port and the remote OpenAI-compatible implementation
//!
//! The remote generator talks to any OpenAI-compatible chat-completions
//! endpoint with a configurable URL, model, and API key env var. Each
//! `generate` call makes exactly one attempt; callers own the fallback.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::GenerationConfig;
use crate::error::{Result, SolaceError};

/// System message framing every generation request
const SYSTEM_PROMPT: &str = "You are a calm, emotionally supportive AI assistant.";

/// Sampling temperature for supportive replies
const TEMPERATURE: f32 = 0.7;

/// Maps a prompt to generated text
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate a reply for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is able to handle requests
    async fn is_available(&self) -> bool;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Remote generator using OpenAI-compatible HTTP APIs
#[derive(Debug)]
pub struct RemoteGenerator {
    client: Client,
    config: GenerationConfig,
    api_key: String,
}

/// OpenAI-compatible chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

/// Message in the chat completion request
#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// OpenAI-compatible chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

/// Choice in the chat completion response
#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

/// Message in the response choice
#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl RemoteGenerator {
    /// Create a new remote generator with the given configuration
    ///
    /// Reads the API key from the environment variable named in
    /// `config.api_key_env`. Returns an error if the variable is not set.
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let api_key = env::var(&config.api_key_env).map_err(|_| {
            SolaceError::Config(format!("API key env var '{}' not set", config.api_key_env))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SolaceError::Generation(e.to_string()))?;

        info!(
            "RemoteGenerator initialized with model: {}, api_url: {}",
            config.model, config.api_url
        );

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl GenerationProvider for RemoteGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );
        debug!("Calling generation API at: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| SolaceError::Generation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SolaceError::Generation(format!(
                "API returned {status}: {error_text}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| SolaceError::Generation(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| SolaceError::Generation("Empty response".to_string()))
    }

    async fn is_available(&self) -> bool {
        !self.api_key.is_empty() && !self.config.api_url.is_empty()
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
