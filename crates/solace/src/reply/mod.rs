//! Reply construction
//!
//! Turns a chat query into a supportive reply grounded in the user's most
//! recent journal entry, behind the safety gate.

pub mod pipeline;
pub mod prompt;

pub use pipeline::{EMPTY_LEDGER_MESSAGE, GENERATION_FALLBACK, ReplyPipeline};
pub use prompt::build_grounding_prompt;
