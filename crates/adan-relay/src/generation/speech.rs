//! Text-to-speech relay

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::{AudioStream, SpeechProvider};

/// Validates speech requests and hands them to the synthesis provider
pub struct SpeechRelay {
    provider: Arc<dyn SpeechProvider>,
}

impl SpeechRelay {
    pub fn new(provider: Arc<dyn SpeechProvider>) -> Self {
        Self { provider }
    }

    /// Synthesize `text` into a stream of MPEG audio
    pub async fn synthesize(&self, text: Option<&str>) -> Result<AudioStream> {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(Error::invalid_input("Missing 'text'.")),
        };

        if !self.provider.is_configured() {
            return Err(Error::configuration("ELEVEN_API_KEY not set in environment."));
        }

        tracing::info!(
            "Synthesizing {} chars via {}",
            text.chars().count(),
            self.provider.name()
        );
        self.provider.synthesize(text).await
    }
}
