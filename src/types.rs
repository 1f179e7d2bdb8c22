//! Core types shared by the server and the client

use serde::{Deserialize, Serialize};

/// Image shown for listings whose image URL is missing
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// A marketplace listing returned by a visual search.
///
/// Fields default to empty so partially filled upstream results still decode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Listing identifier (may be empty for upstream results)
    #[serde(default)]
    pub id: String,
    /// Free-text listing title
    #[serde(default)]
    pub title: String,
    /// Display-formatted price, e.g. "€ 24,50"
    #[serde(default)]
    pub price: String,
    /// Listing image URL
    #[serde(default)]
    pub image: String,
    /// Outbound link to the listing
    #[serde(default)]
    pub url: String,
}

impl SearchResultItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        price: impl Into<String>,
        image: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price: price.into(),
            image: image.into(),
            url: url.into(),
        }
    }

    /// Image to display, falling back to the placeholder
    pub fn image_or_placeholder(&self) -> &str {
        if self.image.is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            &self.image
        }
    }

    /// Key for rendering lists: `id`, else `url`, else the position.
    ///
    /// The position is always appended because pages may repeat items.
    pub fn render_key(&self, index: usize) -> String {
        let base = if !self.id.is_empty() {
            self.id.as_str()
        } else if !self.url.is_empty() {
            self.url.as_str()
        } else {
            return format!("{}-{}", index, index);
        };
        format!("{}-{}", base, index)
    }
}
