//! Liveness endpoint

use axum::{extract::State, Json};

use crate::server::state::AppState;
use crate::types::response::{unix_timestamp, HealthResponse};

/// GET /api/health - Report liveness and the configured model
///
/// Does not contact the model server.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        timestamp: unix_timestamp(),
        model_name: state.chat().model().to_string(),
        model_endpoint: state.chat().endpoint().to_string(),
    })
}
