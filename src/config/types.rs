use crate::config::validation::validate;
use crate::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// The public quotations site crawled when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://quotes.toscrape.com/";

/// Main configuration structure for Quote-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Applies command-line overrides on top of this configuration and
    /// validates the result
    ///
    /// Any value given in `overrides` replaces the one from the file. Paths
    /// must be valid UTF-8 so they round-trip through the string-typed config
    /// unchanged.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self, ConfigError> {
        if let Some(output) = &overrides.output {
            self.output.quotes_path = utf8_path(output)?;
        }
        if let Some(authors) = &overrides.authors {
            self.output.authors_path = Some(utf8_path(authors)?);
        }
        if let Some(base_url) = &overrides.base_url {
            self.site.base_url = base_url.clone();
        }

        validate(&self)?;
        Ok(self)
    }
}

/// Values supplied on the command line that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Quotes CSV path
    pub output: Option<PathBuf>,

    /// Authors CSV path
    pub authors: Option<PathBuf>,

    /// Root URL of the site
    pub base_url: Option<String>,
}

fn utf8_path(path: &Path) -> Result<String, ConfigError> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        ConfigError::Validation(format!("path is not valid UTF-8: {}", path.display()))
    })
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Root of the site; listing pages live at `{base-url}page/{n}/`
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,
}

impl SiteConfig {
    /// Parses the base URL, ensuring the path ends in `/` so relative
    /// links resolve beneath it
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Path to the quotes CSV file
    #[serde(rename = "quotes-path", default = "default_quotes_path")]
    pub quotes_path: String,

    /// Path to the author biographies CSV file; not written when unset
    #[serde(rename = "authors-path", default)]
    pub authors_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quotes_path: default_quotes_path(),
            authors_path: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_crawler_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_quotes_path() -> String {
    "result.csv".to_string()
}
