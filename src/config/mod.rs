//! Configuration module for Quote-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file section falls back to the defaults
//! for the public quotations site.
//!
//! # Example
//!
//! ```no_run
//! use quote_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Crawling: {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, Overrides, SiteConfig, UserAgentConfig, DEFAULT_BASE_URL};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
