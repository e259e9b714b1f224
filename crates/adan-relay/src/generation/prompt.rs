//! Prompt template and reply post-processing for the chat relay

use once_cell::sync::Lazy;
use regex::Regex;

/// Persona and behavior instruction prepended to every chat prompt
pub const SYSTEM_INSTRUCTION: &str = "You are Adan AI. Be concise, helpful, and reply in English. \
Avoid hallucinations; ask a brief question if context is missing.";

static THINK_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<think>.*?</think>").unwrap());

/// Prompt builder for chat turns
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the single-turn chat prompt for `user_text`
    pub fn build_chat_prompt(user_text: &str) -> String {
        format!(
            "{}\n\nUser: {}\nAssistant:",
            SYSTEM_INSTRUCTION,
            user_text.trim()
        )
    }
}

/// Remove every `<think>...</think>` span from a model reply and trim the rest
pub fn strip_reasoning(reply: &str) -> String {
    THINK_BLOCK.replace_all(reply, "").trim().to_string()
}
