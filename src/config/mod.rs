//! Configuration for the MoneyBear search service

mod catalog;
mod logging;
mod server;
mod sitemap;
mod upstream;

pub use catalog::{CatalogConfig, ShuffleMode};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use server::{SearchConfig, SearchMode, ServerConfig};
pub use sitemap::SitemapConfig;
pub use upstream::UpstreamConfig;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::upload::MAX_IMAGE_BYTES;

/// Default user agent for outbound HTTP requests
pub const DEFAULT_USER_AGENT: &str = concat!("moneybear/", env!("CARGO_PKG_VERSION"));

/// Largest page size the catalog endpoint will serve
const MAX_PAGE_SIZE: usize = 100;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config = Self::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file '{}': {}", path.display(), e))?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render this configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate all configuration fields.
    ///
    /// Collects every problem and reports them in one error.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        // Server
        match self.server.listen_addr.rsplit_once(':') {
            Some((_, port)) => match port.parse::<u32>() {
                Ok(p) if p == 0 || p > 65535 => errors.push(format!(
                    "listen port must be between 1 and 65535, got {}",
                    p
                )),
                Ok(_) => {}
                Err(_) => errors.push(format!("listen port '{}' is not a number", port)),
            },
            None => errors.push(format!(
                "listen_addr '{}' must have the form host:port",
                self.server.listen_addr
            )),
        }
        if self.server.max_body_bytes < MAX_IMAGE_BYTES {
            errors.push(format!(
                "max_body_bytes must be at least {} (the image size limit)",
                MAX_IMAGE_BYTES
            ));
        }

        // Upstream
        let endpoint = self.upstream.endpoint.trim();
        if endpoint.is_empty() {
            errors.push("upstream endpoint must not be empty".to_string());
        } else if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            errors.push(format!(
                "upstream endpoint must be an http(s) URL, got '{}'",
                endpoint
            ));
        }
        if self.upstream.timeout_secs == Some(0) {
            errors.push("upstream timeout_secs must be positive when set".to_string());
        }

        // Catalog
        if self.catalog.page_size == 0 {
            errors.push("catalog page_size must be positive".to_string());
        }
        if self.catalog.page_size > MAX_PAGE_SIZE {
            errors.push(format!("catalog page_size must be <= {}", MAX_PAGE_SIZE));
        }

        // Sitemap
        if self.sitemap.base_url.trim().is_empty() {
            errors.push("sitemap base_url must not be empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.sitemap.priority) {
            errors.push("sitemap priority must be between 0.0 and 1.0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }
}
