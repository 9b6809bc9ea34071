//! Pagination driver - main crawl orchestration logic
//!
//! This module walks the listing pages in order, extracts the quotes on each,
//! resolves every quote's author biography through the cache, and collects
//! the results. Fetches are strictly sequential and any failure aborts the
//! whole run.

use crate::crawler::biography::{resolve_biography, BiographyCache};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::parse_listing;
use crate::model::{AuthorBio, Quote};
use crate::output::HarvestSummary;
use crate::state::CrawlState;
use crate::HarvestError;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// Everything collected by one crawl
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    /// Every quote in page order, then document order within a page
    pub quotes: Vec<Quote>,

    /// Distinct biographies in first-encountered order
    pub authors: Vec<Arc<AuthorBio>>,

    pub summary: HarvestSummary,
}

/// Drives the crawl across the numbered listing pages of one site
pub struct Harvester<F> {
    fetcher: F,
    base_url: Url,
}

impl<F: PageFetcher> Harvester<F> {
    /// Creates a harvester for the site rooted at `base_url`
    ///
    /// `base_url` should end in `/`; see `SiteConfig::base_url`.
    pub fn new(fetcher: F, base_url: Url) -> Self {
        Self { fetcher, base_url }
    }

    /// URL of the listing page with the given 1-based number
    pub fn page_url(&self, page: u32) -> Result<Url, HarvestError> {
        Ok(self.base_url.join(&format!("page/{}/", page))?)
    }

    /// Resolves a quote block's author link beneath the base URL
    ///
    /// Leading slashes are dropped so a site mounted under a sub-path keeps
    /// its prefix.
    pub fn author_url(&self, href: &str) -> Result<Url, HarvestError> {
        Ok(self.base_url.join(href.trim_start_matches('/'))?)
    }

    /// Runs the crawl to completion
    ///
    /// Starts at page 1 and stops at the first page with no quote blocks.
    /// There is no page-count limit.
    ///
    /// # Arguments
    ///
    /// * `cache` - Biography cache for this run; normally empty
    ///
    /// # Returns
    ///
    /// * `Ok(Harvest)` - All quotes and distinct biographies
    /// * `Err(HarvestError)` - The first fetch or extraction failure
    pub async fn run(&self, cache: &mut BiographyCache) -> Result<Harvest, HarvestError> {
        tracing::info!("Starting harvest of {}", self.base_url);

        let start_time = std::time::Instant::now();
        let mut harvest = Harvest::default();
        let mut seen: HashSet<Arc<AuthorBio>> = HashSet::new();
        let mut state = CrawlState::start();

        while let Some(page) = state.page() {
            let found = self
                .process_page(page, cache, &mut harvest, &mut seen)
                .await?;
            harvest.summary.pages_fetched += 1;

            state = state.advance(found);
            tracing::debug!("Page {} yielded {} quotes, now {}", page, found, state);
        }

        harvest.summary.quotes = harvest.quotes.len() as u64;
        harvest.summary.distinct_authors = harvest.authors.len() as u64;
        harvest.summary.biography_fetches = cache.misses();
        harvest.summary.cache_hits = cache.hits();

        tracing::info!(
            "Harvest completed: {} quotes, {} authors over {} pages in {:?}",
            harvest.summary.quotes,
            harvest.summary.distinct_authors,
            harvest.summary.pages_fetched,
            start_time.elapsed()
        );

        Ok(harvest)
    }

    /// Processes one listing page, returning the number of quotes found
    async fn process_page(
        &self,
        page: u32,
        cache: &mut BiographyCache,
        harvest: &mut Harvest,
        seen: &mut HashSet<Arc<AuthorBio>>,
    ) -> Result<usize, HarvestError> {
        let url = self.page_url(page)?;
        let body = self.fetcher.fetch(url.as_str()).await?;

        let blocks = parse_listing(&body).map_err(|source| HarvestError::Extract {
            url: url.to_string(),
            source,
        })?;

        if blocks.is_empty() {
            tracing::info!("Page {} has no quotes, stopping", page);
            return Ok(0);
        }

        tracing::info!("Page {}: {} quotes", page, blocks.len());
        let found = blocks.len();

        for block in blocks {
            let author_url = self.author_url(&block.author_href)?;
            let bio = resolve_biography(
                &self.fetcher,
                &block.quote.author,
                author_url.as_str(),
                cache,
            )
            .await?;

            tracing::trace!("Quote by {}: {}", block.quote.author, block.quote.text);
            harvest.quotes.push(block.quote);

            if seen.insert(Arc::clone(&bio)) {
                harvest.authors.push(bio);
            }
        }

        Ok(found)
    }
}
