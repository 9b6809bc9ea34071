/// Crawl state definitions for the pagination driver
///
/// The driver is a two-state machine: it is either fetching a listing page or
/// done. The only way out of `Fetching` is a page that yields no quotes; there
/// is deliberately no page-count ceiling.
use std::fmt;

/// Represents where the pagination driver currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// About to fetch the listing page with this 1-based number
    Fetching { page: u32 },

    /// A page with no quote blocks was seen; nothing further is fetched
    Done,
}

impl CrawlState {
    /// The state every crawl starts in
    pub fn start() -> Self {
        Self::Fetching { page: 1 }
    }

    /// Returns true once the crawl has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The page to fetch next, if any
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Fetching { page } => Some(*page),
            Self::Done => None,
        }
    }

    /// Applies the transition rule after a page was processed
    ///
    /// A page that produced quotes advances to the next page number; an empty
    /// page ends the crawl. `Done` is absorbing.
    pub fn advance(self, quotes_on_page: usize) -> Self {
        match self {
            Self::Fetching { .. } if quotes_on_page == 0 => Self::Done,
            Self::Fetching { page } => Self::Fetching {
                page: page.saturating_add(1),
            },
            Self::Done => Self::Done,
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetching { page } => write!(f, "fetching page {}", page),
            Self::Done => write!(f, "done"),
        }
    }
}
