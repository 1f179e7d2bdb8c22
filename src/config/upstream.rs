//! External visual-search API configuration

use serde::{Deserialize, Serialize};

use super::DEFAULT_USER_AGENT;

/// Upstream search API used in pass-through mode
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Endpoint receiving the forwarded multipart upload
    pub endpoint: String,
    /// Request timeout in seconds (unset = HTTP client default, i.e. none)
    pub timeout_secs: Option<u64>,
    /// User agent sent to the upstream API
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.moneybear.nl/search".to_string(),
            timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
