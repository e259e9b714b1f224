//! LLM provider trait for chat generation

use async_trait::async_trait;

use crate::error::Result;

/// Trait for text generation backends
///
/// Implementations:
/// - `OllamaLlm`: Local Ollama server (deepseek-r1, llama3, etc.)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for a fully built prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;

    /// Base URL the provider talks to
    fn endpoint(&self) -> &str;
}
