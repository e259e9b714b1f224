//! Single-turn chat relay

use std::sync::Arc;

use crate::error::Result;
use crate::providers::LlmProvider;

use super::prompt::{strip_reasoning, PromptBuilder};

/// Forwards user text to the model and cleans the reply
pub struct ChatRelay {
    llm: Arc<dyn LlmProvider>,
}

impl ChatRelay {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Provider behind the relay, for logs
    pub fn provider(&self) -> &str {
        self.llm.name()
    }

    /// Model name reported to clients
    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// Upstream endpoint reported to clients
    pub fn endpoint(&self) -> &str {
        self.llm.endpoint()
    }

    /// Whether the model server answers
    pub async fn is_available(&self) -> bool {
        self.llm.health_check().await.unwrap_or(false)
    }

    /// Produce the assistant reply for `user_text`.
    ///
    /// Blank input short-circuits to an empty reply without contacting the model.
    pub async fn relay(&self, user_text: &str) -> Result<String> {
        let text = user_text.trim();
        if text.is_empty() {
            return Ok(String::new());
        }

        let prompt = PromptBuilder::build_chat_prompt(text);
        let start = std::time::Instant::now();
        let raw = self.llm.generate(&prompt).await?;
        let reply = strip_reasoning(&raw);

        tracing::info!(
            "Chat reply from {}/{} in {:?} ({} -> {} chars)",
            self.llm.name(),
            self.llm.model(),
            start.elapsed(),
            raw.len(),
            reply.len()
        );

        Ok(reply)
    }
}
