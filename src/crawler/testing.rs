//! In-memory site used by the crawler unit tests

use crate::crawler::fetcher::PageFetcher;
use crate::HarvestError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// A listing page with no quote blocks
pub const EMPTY_PAGE: &str = r#"<html><body><div class="col-md-8">No quotes found!</div></body></html>"#;

/// Serves fixed pages by URL and counts every fetch; unknown URLs are 404
#[derive(Debug, Default)]
pub struct FakeSite {
    pages: HashMap<String, String>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl PageFetcher for FakeSite {
    async fn fetch(&self, url: &str) -> Result<String, HarvestError> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| HarvestError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// Builds a listing page from `(text, author, href, tags)` tuples, where
/// `tags` is comma separated
pub fn listing_page(quotes: &[(&str, &str, &str, &str)]) -> String {
    let mut html = String::from("<html><body>");
    for (text, author, href, tags) in quotes {
        html.push_str(&format!(
            r#"<div class="quote"><span class="text">{}</span><span>by <small class="author">{}</small> <a href="{}">(about)</a></span><div class="tags">"#,
            text, author, href
        ));
        for tag in tags.split(',').filter(|t| !t.is_empty()) {
            html.push_str(&format!(r#"<a class="tag" href="/tag/{0}/">{0}</a>"#, tag));
        }
        html.push_str("</div></div>");
    }
    html.push_str("</body></html>");
    html
}
