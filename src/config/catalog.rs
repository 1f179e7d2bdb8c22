//! Mock catalog configuration

use serde::{Deserialize, Serialize};

/// How the catalog is ordered before it is sliced into pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleMode {
    /// Seed the shuffle from the uploaded image, so pages of one image line up
    #[default]
    PerImage,
    /// Fresh shuffle on every request; page N+1 is not a continuation of page N
    PerRequest,
}

/// Mock catalog backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Items per page
    pub page_size: usize,
    /// Simulated processing latency for page 1, in milliseconds
    pub first_page_delay_ms: u64,
    /// Simulated processing latency for later pages, in milliseconds
    pub next_page_delay_ms: u64,
    /// Ordering strategy
    pub shuffle: ShuffleMode,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: 8,
            first_page_delay_ms: 2000,
            next_page_delay_ms: 1000,
            shuffle: ShuffleMode::PerImage,
        }
    }
}
