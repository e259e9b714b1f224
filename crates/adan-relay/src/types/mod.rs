//! Core types for the relay

pub mod document;
pub mod response;

pub use document::FileType;
pub use response::{
    ChatRequest, ChatResponse, ExtractResponse, HealthResponse, SpeechRequest,
};
