//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: The pagination driver's two-state machine (fetching page N, done)

mod crawl_state;

pub use crawl_state::CrawlState;
