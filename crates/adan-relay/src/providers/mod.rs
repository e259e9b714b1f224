//! Provider abstractions for the upstream model and speech services
//!
//! Relays depend on these traits; the HTTP clients are the production
//! implementations and tests substitute in-process mocks.

pub mod elevenlabs;
pub mod llm;
pub mod ollama;
pub mod speech;

pub use elevenlabs::ElevenLabsSpeech;
pub use llm::LlmProvider;
pub use ollama::OllamaLlm;
pub use speech::{AudioStream, SpeechProvider};
