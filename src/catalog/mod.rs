//! Mock catalog backend
//!
//! Answers image searches from a fixed set of listings instead of calling
//! the external API. The image is validated like a real upload, a latency is
//! simulated, and the catalog is shuffled and sliced into pages.
//!
//! With [`ShuffleMode::PerImage`] the shuffle is seeded from the image bytes,
//! so requesting pages 1, 2, 3 for the same image walks one consistent
//! ordering. [`ShuffleMode::PerRequest`] reshuffles on every call and pages
//! may overlap or skip items.

mod data;
mod paginate;

pub use data::{default_catalog, format_price};
pub use paginate::{image_seed, paginate, shuffled, Page};

use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::{CatalogConfig, ShuffleMode};
use crate::types::SearchResultItem;
use crate::upload::{UploadError, UploadedImage};

/// Reasons a catalog search is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("No image provided")]
    MissingImage,
    #[error("Invalid file type. Only JPEG, PNG, and WebP images are allowed.")]
    InvalidType(String),
    #[error("File too large. Maximum size is 5MB.")]
    /// Upload size when known; `None` when the body limit cut it off
    TooLarge(Option<usize>),
    #[error("Invalid multipart request: {0}")]
    Multipart(String),
}

impl From<UploadError> for CatalogError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::UnsupportedType(mime) => Self::InvalidType(mime),
            UploadError::TooLarge(size) => Self::TooLarge(Some(size)),
        }
    }
}

/// Parse the optional `page` form field; anything missing or unparseable is page 1.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// Serves paginated results from an in-memory listing set
#[derive(Debug, Clone)]
pub struct CatalogService {
    items: Vec<SearchResultItem>,
    config: CatalogConfig,
}

impl CatalogService {
    /// Service over the built-in listings
    pub fn new(config: CatalogConfig) -> Self {
        Self::with_items(default_catalog(), config)
    }

    pub fn with_items(items: Vec<SearchResultItem>, config: CatalogConfig) -> Self {
        Self { items, config }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    /// Simulated processing time for a page
    pub fn latency(&self, page: u32) -> Duration {
        if page <= 1 {
            Duration::from_millis(self.config.first_page_delay_ms)
        } else {
            Duration::from_millis(self.config.next_page_delay_ms)
        }
    }

    /// Full catalog in the order used for this image
    pub fn order_for(&self, image: &UploadedImage) -> Vec<SearchResultItem> {
        let seed = match self.config.shuffle {
            ShuffleMode::PerImage => image_seed(&image.bytes),
            ShuffleMode::PerRequest => rand::random(),
        };
        shuffled(&self.items, seed)
    }

    /// Validate the upload, wait out the simulated latency and return one page.
    pub async fn search(
        &self,
        image: Option<&UploadedImage>,
        page: u32,
    ) -> Result<Page<SearchResultItem>, CatalogError> {
        let image = image.ok_or(CatalogError::MissingImage)?;
        image.validate()?;

        let page = page.max(1);
        let delay = self.latency(page);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let result = paginate(&self.order_for(image), page, self.config.page_size);
        debug!(
            "Catalog page {} served: {} items, has_more={}",
            result.page,
            result.items.len(),
            result.has_more
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::MAX_IMAGE_BYTES;
    use std::collections::HashSet;

    fn instant_config(shuffle: ShuffleMode) -> CatalogConfig {
        CatalogConfig {
            first_page_delay_ms: 0,
            next_page_delay_ms: 0,
            shuffle,
            ..CatalogConfig::default()
        }
    }

    fn jpeg(bytes: &[u8]) -> UploadedImage {
        UploadedImage::new(bytes.to_vec(), "image/jpeg", "item.jpg")
    }

    #[test]
    fn parse_page_defaults_to_one() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-2")), 1);
        assert_eq!(parse_page(Some(" 3 ")), 3);
    }

    #[test]
    fn latency_differs_for_first_page() {
        let service = CatalogService::new(CatalogConfig::default());
        assert_eq!(service.latency(1), Duration::from_millis(2000));
        assert_eq!(service.latency(2), Duration::from_millis(1000));
        assert_eq!(service.latency(9), Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn missing_image_is_rejected() {
        let service = CatalogService::new(instant_config(ShuffleMode::PerImage));
        assert_eq!(service.search(None, 1).await, Err(CatalogError::MissingImage));
    }

    #[tokio::test]
    async fn invalid_uploads_are_rejected() {
        let service = CatalogService::new(instant_config(ShuffleMode::PerImage));

        let gif = UploadedImage::new(vec![1u8; 4], "image/gif", "a.gif");
        assert!(matches!(
            service.search(Some(&gif), 1).await,
            Err(CatalogError::InvalidType(_))
        ));

        let big = UploadedImage::new(vec![1u8; MAX_IMAGE_BYTES + 1], "image/webp", "a.webp");
        assert_eq!(
            service.search(Some(&big), 1).await,
            Err(CatalogError::TooLarge(Some(MAX_IMAGE_BYTES + 1)))
        );
    }

    #[tokio::test]
    async fn pages_hold_at_most_page_size_items() {
        let service = CatalogService::new(instant_config(ShuffleMode::PerRequest));
        let image = jpeg(b"lamp");
        let total = service.len();
        for page in 1..=5u32 {
            let result = service.search(Some(&image), page).await.unwrap();
            assert!(result.items.len() <= 8);
            assert_eq!(result.total, total);
            assert_eq!(result.has_more, total > page as usize * 8);
        }
    }

    #[tokio::test]
    async fn per_image_pages_are_stable_continuations() {
        let service = CatalogService::new(instant_config(ShuffleMode::PerImage));
        let image = jpeg(b"same image every time");

        let mut ids = HashSet::new();
        let mut page = 1;
        loop {
            let result = service.search(Some(&image), page).await.unwrap();
            for item in &result.items {
                assert!(ids.insert(item.id.clone()), "duplicate {} on page {}", item.id, page);
            }
            if !result.has_more {
                break;
            }
            page += 1;
        }
        assert_eq!(ids.len(), service.len());
    }

    #[tokio::test]
    async fn per_image_order_is_repeatable() {
        let service = CatalogService::new(instant_config(ShuffleMode::PerImage));
        let image = jpeg(b"bike");
        let first = service.search(Some(&image), 2).await.unwrap();
        let again = service.search(Some(&image), 2).await.unwrap();
        assert_eq!(first, again);
    }
}
