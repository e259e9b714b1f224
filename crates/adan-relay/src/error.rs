//! Error types for the relay

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Relay errors
#[derive(Debug, Error)]
pub enum Error {
    /// Document could not be interpreted as its declared format
    #[error("{format} parse error: {cause}")]
    Parse { format: String, cause: String },

    /// Extension not in the registered set
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Missing or blank required input
    #[error("{0}")]
    InvalidInput(String),

    /// Required configuration (credential, address) absent or invalid
    #[error("{0}")]
    Configuration(String),

    /// Transport failure or non-success response from an upstream service
    #[error("{service} error: {message}")]
    Upstream {
        service: String,
        status: Option<u16>,
        message: String,
    },

    /// Upstream service did not answer within the configured timeout
    #[error("{service} timed out after {timeout_secs}s")]
    UpstreamTimeout { service: String, timeout_secs: u64 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a parse error for the given format
    pub fn parse(format: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Parse {
            format: format.into(),
            cause: cause.to_string(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an upstream error without a status code (transport or body failure)
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Create an upstream error carrying the upstream's status code
    pub fn upstream_status(
        service: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        Self::Upstream {
            service: service.into(),
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status this error maps to at the boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Parse { .. } | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Error::Upstream { status, .. } => status
                .and_then(|code| StatusCode::from_u16(code).ok())
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Error::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Error::Configuration(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            Error::Parse { .. } => "parse_error",
            Error::UnsupportedFormat(_) => "unsupported_type",
            Error::InvalidInput(_) => "invalid_input",
            Error::Configuration(_) => "config_error",
            Error::Upstream { .. } => "upstream_error",
            Error::UpstreamTimeout { .. } => "upstream_timeout",
            Error::Io(_) => "io_error",
            Error::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status, self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }

        let body = Json(json!({
            "ok": false,
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
