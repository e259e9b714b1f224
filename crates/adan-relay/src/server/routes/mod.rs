//! API routes for the relay server

pub mod chat;
pub mod extract;
pub mod health;
pub mod tts;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/chat", post(chat::chat))
        // Uploads get the configured limit instead of axum's 2MB default
        .route(
            "/extract",
            post(extract::extract).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/tts", post(tts::tts))
}
