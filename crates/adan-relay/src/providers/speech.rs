//! Speech synthesis provider trait

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;
use std::pin::Pin;

use crate::error::Result;

/// Audio body forwarded chunk by chunk from the synthesis service
pub type AudioStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Trait for text-to-speech backends
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Start synthesizing `text`; the returned stream yields encoded audio
    async fn synthesize(&self, text: &str) -> Result<AudioStream>;

    /// Whether credentials are present
    fn is_configured(&self) -> bool;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
