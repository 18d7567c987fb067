//! Reply pipeline
//!
//! Produces the user-facing reply for a chat query. Per call:
//! safety check -> latest-entry retrieval -> grounding prompt -> generation,
//! with fixed exits for high-risk input, an empty ledger, and provider
//! failure. The caller always gets a displayable string, never an error.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::memory::{MemoryStore, UserId};
use crate::providers::GenerationProvider;
use crate::reply::prompt::build_grounding_prompt;
use crate::safety::{RiskLabel, SafetyGate};

/// Reply when the user has no journal entries yet
pub const EMPTY_LEDGER_MESSAGE: &str = "You haven’t written any journal entries yet. \
Please write one first so I can reflect with you.";

/// Reply when the generation provider fails or times out
pub const GENERATION_FALLBACK: &str =
    "I'm here for you. You're not alone. Please take a breath and try again.";

/// Orchestrates gate, store, and generator into one reply
pub struct ReplyPipeline {
    store: Arc<MemoryStore>,
    generator: Arc<dyn GenerationProvider>,
    gate: SafetyGate,
}

impl ReplyPipeline {
    pub fn new(store: Arc<MemoryStore>, generator: Arc<dyn GenerationProvider>) -> Self {
        Self {
            store,
            generator,
            gate: SafetyGate::new(),
        }
    }

    /// Produce a reply for a user's chat query
    ///
    /// High-risk queries are answered with the fixed crisis message before
    /// any store or provider access. With no journal entries the user is
    /// prompted to write one. Generation failure degrades to the calm
    /// fallback string.
    pub async fn respond(&self, user_id: &UserId, query: &str) -> String {
        if self.gate.analyze(query) == RiskLabel::HighRisk {
            warn!("high-risk query intercepted for {user_id}");
            return self.gate.crisis_message().to_string();
        }

        let Some(record) = self.store.latest(user_id).await else {
            debug!("no journal entries for {user_id}, prompting to write one");
            return EMPTY_LEDGER_MESSAGE.to_string();
        };

        let prompt = build_grounding_prompt(&record.text, query);
        match self.generator.generate(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("generation failed for {user_id}, serving fallback: {e}");
                GENERATION_FALLBACK.to_string()
            }
        }
    }
}
