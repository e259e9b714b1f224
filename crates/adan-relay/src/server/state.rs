//! Application state for the relay server

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::error::Result;
use crate::generation::{ChatRelay, SpeechRelay};
use crate::ingestion::ExtractionDispatcher;
use crate::providers::{ElevenLabsSpeech, LlmProvider, OllamaLlm, SpeechProvider};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RelayConfig,
    /// Extension-keyed extractor registry
    dispatcher: Arc<ExtractionDispatcher>,
    /// Model relay
    chat: ChatRelay,
    /// Speech relay
    speech: SpeechRelay,
}

impl AppState {
    /// Create state backed by the HTTP providers described in `config`
    pub fn new(config: RelayConfig) -> Result<Self> {
        let llm: Arc<dyn LlmProvider> = Arc::new(OllamaLlm::new(&config.llm)?);
        tracing::info!(
            "Ollama provider initialized ({} at {})",
            config.llm.generate_model,
            config.llm.base_url
        );

        let speech: Arc<dyn SpeechProvider> = Arc::new(ElevenLabsSpeech::new(&config.speech)?);
        if speech.is_configured() {
            tracing::info!("ElevenLabs provider initialized (voice {})", config.speech.voice_id);
        } else {
            tracing::warn!("ELEVEN_API_KEY not set; /api/tts will fail until it is configured");
        }

        let mut dispatcher = ExtractionDispatcher::new();
        if let Some(dir) = &config.server.temp_dir {
            dispatcher = dispatcher.with_temp_dir(dir);
        }

        Ok(Self::from_parts(config, dispatcher, llm, speech))
    }

    /// Assemble state from already-built components
    pub fn from_parts(
        config: RelayConfig,
        dispatcher: ExtractionDispatcher,
        llm: Arc<dyn LlmProvider>,
        speech: Arc<dyn SpeechProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                dispatcher: Arc::new(dispatcher),
                chat: ChatRelay::new(llm),
                speech: SpeechRelay::new(speech),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RelayConfig {
        &self.inner.config
    }

    /// Get the extraction dispatcher (cloneable into blocking tasks)
    pub fn dispatcher(&self) -> Arc<ExtractionDispatcher> {
        Arc::clone(&self.inner.dispatcher)
    }

    /// Get the chat relay
    pub fn chat(&self) -> &ChatRelay {
        &self.inner.chat
    }

    /// Get the speech relay
    pub fn speech(&self) -> &SpeechRelay {
        &self.inner.speech
    }
}
