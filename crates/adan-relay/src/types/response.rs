//! Request and response bodies for the HTTP API

use serde::{Deserialize, Serialize};

/// Current Unix time in fractional seconds
pub fn unix_timestamp() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

/// GET /api/health response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub timestamp: f64,
    pub model_name: String,
    pub model_endpoint: String,
}

/// POST /api/chat request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Anything other than a JSON string reads as empty input
    #[serde(default, deserialize_with = "string_or_empty")]
    pub text: String,
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => Ok(text),
        _ => Ok(String::new()),
    }
}

/// POST /api/chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub ok: bool,
    pub reply: String,
    /// Absent when the input was empty and the model was not contacted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

impl ChatResponse {
    /// Reply for blank input
    pub fn empty() -> Self {
        Self {
            ok: true,
            reply: String::new(),
            model_name: None,
            timestamp: None,
        }
    }

    /// Reply produced by the model
    pub fn from_model(reply: String, model_name: impl Into<String>) -> Self {
        Self {
            ok: true,
            reply,
            model_name: Some(model_name.into()),
            timestamp: Some(unix_timestamp()),
        }
    }
}

/// POST /api/extract response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub ok: bool,
    pub text: String,
}

/// POST /api/tts JSON/form body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
}
