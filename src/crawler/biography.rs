//! Author biography resolution and caching
//!
//! Biographies are fetched at most once per URL for the lifetime of a
//! `BiographyCache`. The cache is created empty for each crawl and passed in
//! explicitly; nothing here is global.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{parse_biography, BIOGRAPHY_NOT_FOUND};
use crate::model::AuthorBio;
use crate::HarvestError;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-run mapping from biography URL to the resolved `AuthorBio`
///
/// Entries are inserted once and never overwritten.
#[derive(Debug, Default)]
pub struct BiographyCache {
    entries: HashMap<String, Arc<AuthorBio>>,
    hits: u64,
    misses: u64,
}

impl BiographyCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a URL, counting the lookup as a hit or a miss
    pub fn lookup(&mut self, url: &str) -> Option<Arc<AuthorBio>> {
        match self.entries.get(url) {
            Some(bio) => {
                self.hits += 1;
                Some(Arc::clone(bio))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores a biography under `url` unless one is already present
    ///
    /// Returns the value held by the cache afterwards, which is the earlier
    /// entry if the URL was already cached.
    pub fn insert(&mut self, url: &str, bio: AuthorBio) -> Arc<AuthorBio> {
        Arc::clone(
            self.entries
                .entry(url.to_string())
                .or_insert_with(|| Arc::new(bio)),
        )
    }

    /// Returns true if the URL has been resolved before
    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that required a fetch
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Resolves an author's biography, fetching the page only on a cache miss
///
/// # Arguments
///
/// * `fetcher` - Used to fetch the biography page on a miss
/// * `author` - The author's display name as it appeared on the quote
/// * `url` - Absolute URL of the biography page (the cache key)
/// * `cache` - The run's biography cache
///
/// # Returns
///
/// * `Ok(Arc<AuthorBio>)` - The cached or freshly resolved biography. A page
///   without a description region resolves to `"Biography not found"`.
/// * `Err(HarvestError)` - The biography page could not be fetched
pub async fn resolve_biography<F: PageFetcher + ?Sized>(
    fetcher: &F,
    author: &str,
    url: &str,
    cache: &mut BiographyCache,
) -> Result<Arc<AuthorBio>, HarvestError> {
    if let Some(bio) = cache.lookup(url) {
        tracing::trace!("Biography cache hit for {}", url);
        return Ok(bio);
    }

    tracing::debug!("Fetching biography of {} from {}", author, url);
    let body = fetcher.fetch(url).await?;

    let bio = parse_biography(&body)
        .map_err(|source| HarvestError::Extract {
            url: url.to_string(),
            source,
        })?
        .unwrap_or_else(|| {
            tracing::warn!("No description region on {}", url);
            BIOGRAPHY_NOT_FOUND.to_string()
        });

    Ok(cache.insert(url, AuthorBio::new(author, bio)))
}
