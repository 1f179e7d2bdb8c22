//! Health probe

use axum::{extract::State, response::IntoResponse, Json};

use super::AppState;
use crate::http::types::HealthResponse;

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        mode: state.mode,
    })
}
