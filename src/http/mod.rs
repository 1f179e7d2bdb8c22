//! HTTP API Server Module
//!
//! Serves the image search endpoint used by the upload page, plus the
//! sitemap and a health probe.

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use server::HttpServer;
