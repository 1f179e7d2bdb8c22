//! Sitemap handler

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::AppState;
use crate::http::types::ErrorResponse;
use crate::sitemap::{collect_entries, render_sitemap};

/// `GET /api/sitemap.xml`
pub async fn sitemap(State(state): State<AppState>) -> Response {
    let today = chrono::Utc::now().date_naive();
    let entries = collect_entries(&state.sitemap, today);

    match render_sitemap(&state.sitemap, &entries) {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/xml")], xml).into_response(),
        Err(e) => {
            error!("Sitemap rendering failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to generate sitemap")),
            )
                .into_response()
        }
    }
}
