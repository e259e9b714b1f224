//! ElevenLabs text-to-speech client implementing `SpeechProvider`

use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::{header, Client};
use serde::Serialize;
use std::time::Duration;

use crate::config::SpeechConfig;
use crate::error::{Error, Result};

use super::speech::{AudioStream, SpeechProvider};

const SERVICE: &str = "ElevenLabs";

#[derive(Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// ElevenLabs speech provider returning MPEG audio
pub struct ElevenLabsSpeech {
    client: Client,
    config: SpeechConfig,
}

impl ElevenLabsSpeech {
    /// Create a new ElevenLabs provider
    ///
    /// A missing API key is not an error here; synthesis fails per request.
    /// `timeout_secs` bounds connecting and waiting for response headers only;
    /// the audio body may stream for as long as the upstream keeps sending.
    pub fn new(config: &SpeechConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn timeout_error(&self) -> Error {
        Error::UpstreamTimeout {
            service: SERVICE.to_string(),
            timeout_secs: self.config.timeout_secs,
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            self.timeout_error()
        } else {
            Error::upstream(SERVICE, format!("Request failed: {}", e))
        }
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsSpeech {
    async fn synthesize(&self, text: &str) -> Result<AudioStream> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::configuration("ELEVEN_API_KEY not set in environment."))?;

        let url = format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url, self.config.voice_id
        );
        let request = SynthesisRequest {
            text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        };

        let send = self
            .client
            .post(&url)
            .header(header::ACCEPT, "audio/mpeg")
            .header("xi-api-key", api_key)
            .json(&request)
            .send();
        let response = tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), send)
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("ElevenLabs returned {}: {}", status, body);
            return Err(Error::upstream_status(SERVICE, status.as_u16(), body));
        }

        tracing::debug!(
            "Streaming speech for {} chars with voice {}",
            text.len(),
            self.config.voice_id
        );

        let stream = response
            .bytes_stream()
            .map_err(|e| Error::upstream(SERVICE, format!("Audio stream interrupted: {}", e)));

        Ok(Box::pin(stream))
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn name(&self) -> &str {
        "elevenlabs"
    }
}
