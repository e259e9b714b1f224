//! Chat endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse};

/// POST /api/chat - Relay one user message to the model
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(request) =
        payload.map_err(|e| Error::invalid_input(format!("Invalid chat request: {}", e.body_text())))?;

    if request.text.trim().is_empty() {
        return Ok(Json(ChatResponse::empty()));
    }

    tracing::info!("Chat request ({} chars)", request.text.chars().count());
    let reply = state.chat().relay(&request.text).await?;

    Ok(Json(ChatResponse::from_model(reply, state.chat().model())))
}
