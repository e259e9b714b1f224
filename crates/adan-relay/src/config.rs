//! Configuration for the relay
//!
//! Built once at startup from the environment and shared read-only afterwards.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Main relay configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Ollama/LLM configuration
    pub llm: LlmConfig,
    /// Text-to-speech configuration
    pub speech: SpeechConfig,
}

impl RelayConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset so that `FOO=` in a `.env` file falls
    /// back to the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(host) = get("RELAY_HOST") {
            config.server.host = host;
        }
        if let Some(port) = parse_var(&get, "RELAY_PORT")? {
            config.server.port = port;
        }
        if let Some(limit) = parse_var(&get, "RELAY_MAX_UPLOAD_BYTES")? {
            config.server.max_upload_size = limit;
        }

        if let Some(url) = get("OLLAMA_URL") {
            config.llm.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = get("OLLAMA_MODEL") {
            config.llm.generate_model = model;
        }
        if let Some(secs) = parse_var(&get, "OLLAMA_TIMEOUT_SECS")? {
            config.llm.timeout_secs = secs;
        }

        config.speech.api_key = get("ELEVEN_API_KEY");
        if let Some(voice) = get("ELEVEN_VOICE_ID") {
            config.speech.voice_id = voice;
        }
        if let Some(model) = get("ELEVEN_MODEL_ID") {
            config.speech.model_id = model;
        }
        if let Some(url) = get("ELEVEN_BASE_URL") {
            config.speech.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = parse_var(&get, "ELEVEN_TIMEOUT_SECS")? {
            config.speech.timeout_secs = secs;
        }

        Ok(config)
    }
}

fn parse_var<T, G>(get: &G, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| Error::configuration(format!("Invalid {} '{}': {}", key, raw, e)))
        })
        .transpose()
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Maximum upload size in bytes (default: 100MB)
    pub max_upload_size: usize,
    /// Directory for extraction temp files (system temp dir when unset)
    pub temp_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_upload_size: 100 * 1024 * 1024, // 100MB
            temp_dir: None,
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Generation model name
    pub generate_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:11434".to_string(),
            generate_model: "deepseek-r1:7b".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Text-to-speech (ElevenLabs) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// API base URL
    pub base_url: String,
    /// API key; only required when synthesis is requested
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Voice identifier (default: Rachel)
    pub voice_id: String,
    /// Synthesis model identifier
    pub model_id: String,
    /// Voice stability
    pub stability: f32,
    /// Voice similarity boost
    pub similarity_boost: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            api_key: None,
            voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
            model_id: "eleven_monolingual_v1".to_string(),
            stability: 0.6,
            similarity_boost: 0.85,
            timeout_secs: 60,
        }
    }
}
