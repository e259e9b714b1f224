//! adan-relay: Backend relay for the Adan assistant
//!
//! Extracts plain text from uploaded office documents, PDFs, spreadsheets and
//! web pages, relays chat turns to a local Ollama model, and proxies
//! text-to-speech requests to ElevenLabs with the audio streamed back.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod types;

pub use config::RelayConfig;
pub use error::{Error, Result};
pub use ingestion::ExtractionDispatcher;
pub use server::{create_router, state::AppState, RelayServer};
pub use types::FileType;
