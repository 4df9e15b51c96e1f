//! Web scraper module for calscape.org
//!
//! Provides the upstream client, HTML parsing, and field extraction.

pub mod client;
pub mod error;
pub mod extract;
pub mod parsers;

pub use client::CalscapeClient;
pub use error::ScrapeError;

/// Base URL for calscape.org
pub const BASE_URL: &str = "https://calscape.org";

/// Build search listing URL
pub fn search_url(base_url: &str) -> String {
    format!("{}/search/vw-list", base_url)
}

/// Build plant detail URL
pub fn detail_url(base_url: &str, slug: &str) -> String {
    format!("{}/search/x/{}", base_url, slug)
}
