//! Catalog ordering and page slicing

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// One page of a larger ordered sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was served
    pub page: u32,
    pub has_more: bool,
    /// Size of the full sequence
    pub total: usize,
}

/// Slice `items` into the 1-based `page` of `page_size` entries.
///
/// Page 0 is treated as page 1. Pages past the end are empty.
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let total = items.len();
    let start = (page as usize - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);

    Page {
        items: items[start..end].to_vec(),
        page,
        has_more: end < total,
        total,
    }
}

/// Deterministically shuffle a copy of `items` from `seed`.
pub fn shuffled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = items.to_vec();
    out.shuffle(&mut rng);
    out
}

/// Shuffle seed derived from image content
pub fn image_seed(bytes: &[u8]) -> u64 {
    xxhash_rust::xxh3::xxh3_64(bytes)
}
