//! Sitemap configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Public site root, without trailing slash
    pub base_url: String,
    /// Static page slugs ("" is the homepage)
    pub pages: Vec<String>,
    pub changefreq: String,
    pub priority: f64,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.moneybear.nl".to_string(),
            pages: ["", "about", "contact", "privacy-policy", "terms"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            changefreq: "weekly".to_string(),
            priority: 0.8,
        }
    }
}
