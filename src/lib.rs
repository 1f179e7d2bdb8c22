//! Moneybear: visual search for second-hand products
//!
//! A small search backend for an image upload page:
//! - Pass-through proxy to the external image search API
//! - Mock catalog with paginated, shuffled listings for local development
//! - Static sitemap generation
//! - Client session logic for upload, caption refinement and infinite scroll

pub mod catalog;
pub mod client;
pub mod config;
pub mod http;
pub mod logging;
pub mod sitemap;
pub mod types;
pub mod upload;
pub mod upstream;
pub mod util;

pub use config::Config;
pub use types::*;
