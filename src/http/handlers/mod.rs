//! HTTP API Request Handlers

mod search;
mod sitemap;
mod system;

use std::sync::Arc;

use crate::catalog::CatalogService;
use crate::config::{Config, SearchMode, SitemapConfig};
use crate::upstream::UpstreamClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub mode: SearchMode,
    pub upstream: Arc<UpstreamClient>,
    pub catalog: Arc<CatalogService>,
    pub sitemap: Arc<SitemapConfig>,
}

impl AppState {
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Ok(Self {
            mode: config.search.mode,
            upstream: Arc::new(UpstreamClient::new(&config.upstream)?),
            catalog: Arc::new(CatalogService::new(config.catalog.clone())),
            sitemap: Arc::new(config.sitemap.clone()),
        })
    }
}

pub use search::{catalog_search, passthrough_search};
pub use sitemap::sitemap;
pub use system::health;
