//! Document text extraction endpoint

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::ExtractResponse;

const FILE_FIELD: &str = "file";

/// POST /api/extract - Extract plain text from one uploaded document
pub async fn extract(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>> {
    // A body that is not multipart carries no file at all
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!("Rejected extract body: {}", e.body_text());
        Error::invalid_input("No file.")
    })?;
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_input(format!("Failed to read multipart field: {}", e)))?
    {
        let is_file = field.name() == Some(FILE_FIELD) || field.file_name().is_some();
        if !is_file {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| Error::invalid_input(format!("Failed to read file: {}", e)))?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| Error::invalid_input("No file."))?;

    tracing::info!("Extracting file: {} ({} bytes)", filename, data.len());
    let start = Instant::now();

    let dispatcher = state.dispatcher();
    let name = filename.clone();
    let text = tokio::task::spawn_blocking(move || dispatcher.dispatch(&name, &data))
        .await
        .map_err(|e| Error::internal(format!("Extraction task failed: {}", e)))??;

    tracing::info!(
        "Extracted {} chars from {} in {:.2}s",
        text.len(),
        filename,
        start.elapsed().as_secs_f64()
    );

    Ok(Json(ExtractResponse { ok: true, text }))
}
