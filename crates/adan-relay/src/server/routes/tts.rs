//! Text-to-speech endpoint

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::Response,
    Form, Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::SpeechRequest;

/// `text` taken from a JSON body, a urlencoded form, or a multipart form
#[derive(Debug, Default)]
pub struct SpeechText(pub Option<String>);

#[async_trait]
impl<S> FromRequest<S> for SpeechText
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| Error::invalid_input(e.body_text()))?;
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| Error::invalid_input(format!("Failed to read multipart field: {}", e)))?
            {
                if field.name() == Some("text") {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| Error::invalid_input(format!("Failed to read text: {}", e)))?;
                    return Ok(Self(Some(text)));
                }
            }
            Ok(Self(None))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(request) = Form::<SpeechRequest>::from_request(req, state)
                .await
                .map_err(|e| Error::invalid_input(e.body_text()))?;
            Ok(Self(request.text))
        } else if content_type.starts_with("application/json") {
            let Json(request) = Json::<SpeechRequest>::from_request(req, state)
                .await
                .map_err(|e| Error::invalid_input(e.body_text()))?;
            Ok(Self(request.text))
        } else {
            Ok(Self(None))
        }
    }
}

/// POST /api/tts - Stream synthesized speech for the given text
pub async fn tts(State(state): State<AppState>, SpeechText(text): SpeechText) -> Result<Response> {
    let audio = state.speech().synthesize(text.as_deref()).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .body(Body::from_stream(audio))
        .map_err(|e| Error::internal(format!("Failed to build audio response: {}", e)))
}
