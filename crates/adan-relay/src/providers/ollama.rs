//! Ollama HTTP client implementing `LlmProvider`

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::llm::LlmProvider;

const SERVICE: &str = "Ollama";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Ollama LLM provider using the non-streaming generate endpoint
pub struct OllamaLlm {
    client: Client,
    config: LlmConfig,
}

impl OllamaLlm {
    /// Create a new Ollama provider
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::UpstreamTimeout {
                service: SERVICE.to_string(),
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            Error::upstream(SERVICE, format!("Request failed: {}", e))
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url);
        let request = GenerateRequest {
            model: &self.config.generate_model,
            prompt,
            stream: false,
        };

        tracing::debug!(
            "Generating with {} ({} prompt chars)",
            self.config.generate_model,
            prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream_status(
                SERVICE,
                status.as_u16(),
                format!("HTTP {}: {}", status, body),
            ));
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let parsed: GenerateResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::upstream(SERVICE, format!("Invalid response: {}", e)))?;

        Ok(parsed.response)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.config.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.config.generate_model
    }

    fn endpoint(&self) -> &str {
        &self.config.base_url
    }
}
