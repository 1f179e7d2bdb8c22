//! HTTP API Route Definitions

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use super::handlers::{self, AppState};
use crate::config::SearchMode;

/// Create the API router.
///
/// The search route is bound to the handler for the configured mode; the
/// two modes use different form field names and are never mixed.
pub fn create_router(app_state: AppState, max_body_bytes: usize) -> Router {
    let search = match app_state.mode {
        SearchMode::Passthrough => post(handlers::passthrough_search),
        SearchMode::Catalog => post(handlers::catalog_search),
    };

    let api = Router::new()
        .route("/search", search)
        .route("/sitemap.xml", get(handlers::sitemap))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(app_state);

    Router::new().nest("/api", api)
}
