//! Keyword safety gate
//!
//! Classifies incoming text before any reply generation. Matching is
//! case-insensitive and by substring, not whole words: a phrase buried in a
//! longer sentence must still trip the gate, accepting false positives over
//! false negatives.

/// High-risk phrases checked against lowercased input
const RISK_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "want to die",
    "self harm",
    "hurt myself",
];

/// Fixed message returned for high-risk input. Never generated.
const CRISIS_MESSAGE: &str = "⚠️ I’m really concerned about your safety.\n\
Please reach out to a trusted person or local emergency services immediately.\n\
You deserve care, support, and understanding.";

/// Binary safety classification of a text input. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLabel {
    Ok,
    HighRisk,
}

/// Classifies text against the fixed keyword set
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyGate;

impl SafetyGate {
    pub fn new() -> Self {
        Self
    }

    /// Classify a text input. Deterministic, pure, no I/O.
    pub fn analyze(&self, text: &str) -> RiskLabel {
        let lowered = text.to_lowercase();
        if RISK_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            RiskLabel::HighRisk
        } else {
            RiskLabel::Ok
        }
    }

    /// The fixed crisis response directing the user to immediate help
    pub fn crisis_message(&self) -> &'static str {
        CRISIS_MESSAGE
    }
}
