//! HTTP server and search mode configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::upload::MAX_IMAGE_BYTES;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:3000")
    pub listen_addr: String,
    /// Enable CORS (needed when the upload page is served from another origin)
    pub cors_enabled: bool,
    /// Maximum accepted request body in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:3000".to_string(),
            cors_enabled: false,
            // Larger than the image limit so oversized uploads get a descriptive 400
            max_body_bytes: 2 * MAX_IMAGE_BYTES,
        }
    }
}

/// Which backend answers `POST /api/search`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Forward the upload to the external visual-search API
    #[default]
    Passthrough,
    /// Answer from the built-in mock catalog
    Catalog,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::Catalog => "catalog",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "passthrough" | "proxy" => Ok(Self::Passthrough),
            "catalog" | "mock" => Ok(Self::Catalog),
            other => Err(format!("unknown search mode '{}'", other)),
        }
    }
}

/// Search endpoint configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub mode: SearchMode,
}
