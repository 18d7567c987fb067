//! Grounding prompt construction
//!
//! The prompt restricts the generation provider to the single latest journal
//! entry: it embeds that entry and the user's question verbatim and forbids
//! any other memory or general knowledge.

/// Build the grounding instruction for the latest journal entry and query
pub fn build_grounding_prompt(latest_journal: &str, query: &str) -> String {
    format!(
        "You are an emotional support assistant.\n\
         \n\
         You MUST answer ONLY using the journal below.\n\
         You are NOT allowed to use any older memory or general psychology knowledge.\n\
         \n\
         Latest journal:\n\
         \"{latest_journal}\"\n\
         \n\
         User question:\n\
         \"{query}\"\n\
         \n\
         Give a warm, emotionally supportive reply strictly based on the journal."
    )
}
