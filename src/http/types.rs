//! HTTP API Request/Response Types
//!
//! JSON bodies produced by the search API. Field names follow the
//! browser client's camelCase convention.

use serde::{Deserialize, Serialize};

use crate::catalog::Page;
use crate::config::SearchMode;
use crate::types::SearchResultItem;

/// Header set on responses generated by the proxy itself when the upstream
/// call failed, so they can't be mistaken for a relayed upstream body
pub const PROXY_ERROR_HEADER: &str = "x-proxy-error";

/// Mock catalog search response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSearchResponse {
    pub success: bool,
    pub products: Vec<SearchResultItem>,
    pub has_more: bool,
    pub page: u32,
    pub total_results: usize,
}

impl From<Page<SearchResultItem>> for CatalogSearchResponse {
    fn from(page: Page<SearchResultItem>) -> Self {
        Self {
            success: true,
            products: page.items,
            has_more: page.has_more,
            page: page.page,
            total_results: page.total,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
    /// Backend currently answering searches
    pub mode: SearchMode,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
