//! Relays between HTTP handlers and upstream providers

pub mod chat;
pub mod prompt;
pub mod speech;

pub use chat::ChatRelay;
pub use prompt::{strip_reasoning, PromptBuilder};
pub use speech::SpeechRelay;
