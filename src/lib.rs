//! Quote-Harvest: a sequential quotation crawler
//!
//! This crate walks the numbered listing pages of a quotations site, extracts
//! every quote with its author and tags, resolves each author's biography
//! through a per-run cache, and writes the results as CSV.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod state;

use std::path::Path;
use thiserror::Error;

/// Main error type for Quote-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Extraction failed for {url}: {source}")]
    Extract { url: String, source: ExtractError },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Markup extraction errors
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Missing expected field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Quote-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Harvest, Harvester, HttpFetcher, PageFetcher};
pub use model::{AuthorBio, Quote};
pub use state::CrawlState;

/// Crawls the default site and writes every quote to `output_path`
///
/// This is the one-shot entry point: a full crawl with a fresh biography
/// cache, followed by a single CSV write. Any crawl failure aborts the run
/// and nothing is written. `output_path` must be valid UTF-8.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> quote_harvest::Result<()> {
/// let harvest = quote_harvest::run("result.csv").await?;
/// println!("{} quotes", harvest.quotes.len());
/// # Ok(())
/// # }
/// ```
pub async fn run(output_path: impl AsRef<Path>) -> Result<Harvest> {
    let overrides = config::Overrides {
        output: Some(output_path.as_ref().to_path_buf()),
        ..Default::default()
    };
    let config = Config::default().with_overrides(&overrides)?;
    run_with_config(&config).await
}

/// Crawls the configured site and writes the configured outputs
///
/// The authors file, when configured, is written before the quotes file. If
/// writing the quotes file then fails, the authors file is removed again, so
/// an `Err` never leaves output behind.
pub async fn run_with_config(config: &Config) -> Result<Harvest> {
    let harvest = crawler::crawl(config).await?;
    let quotes_path = Path::new(&config.output.quotes_path);

    if let Some(authors_path) = &config.output.authors_path {
        output::write_authors_csv(&harvest.authors, Path::new(authors_path))?;
        tracing::info!(
            "Wrote {} author biographies to {}",
            harvest.authors.len(),
            authors_path
        );

        if let Err(e) = output::write_quotes_csv(&harvest.quotes, quotes_path) {
            if let Err(cleanup) = std::fs::remove_file(authors_path) {
                tracing::warn!("Could not remove {}: {}", authors_path, cleanup);
            }
            return Err(e.into());
        }
    } else {
        output::write_quotes_csv(&harvest.quotes, quotes_path)?;
    }

    tracing::info!(
        "Wrote {} quotes to {}",
        harvest.quotes.len(),
        config.output.quotes_path
    );

    Ok(harvest)
}
