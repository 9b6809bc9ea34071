//! Crawler module for page fetching and quote collection
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` capability
//! - HTML extraction of quotes and biographies
//! - The per-run biography cache
//! - The pagination driver

mod biography;
mod coordinator;
mod fetcher;
mod parser;
#[cfg(test)]
mod testing;

pub use biography::{resolve_biography, BiographyCache};
pub use coordinator::{Harvest, Harvester};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use parser::{parse_biography, parse_listing, parse_quote, QuoteBlock, BIOGRAPHY_NOT_FOUND};

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Resolve the site's base URL
/// 2. Build the HTTP client
/// 3. Walk the listing pages with a fresh biography cache
///
/// # Arguments
///
/// * `config` - The harvest configuration
///
/// # Returns
///
/// * `Ok(Harvest)` - Crawl completed successfully
/// * `Err(HarvestError)` - Crawl failed; nothing partial is returned
pub async fn crawl(config: &Config) -> Result<Harvest, HarvestError> {
    let base_url = config.site.base_url()?;
    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let harvester = Harvester::new(fetcher, base_url);

    let mut cache = BiographyCache::new();
    harvester.run(&mut cache).await
}
