//! Health handler.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::http::responses::HealthResponse;
use crate::state::AppState;

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        backend: state.storage.backend_name(),
    })
}
