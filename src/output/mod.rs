//! Output module for writing harvest results
//!
//! This module handles:
//! - Writing quotes and author biographies as CSV
//! - Summarising a finished harvest

mod csv;
mod summary;

pub use self::csv::{
    format_tags, parse_rows, write_authors, write_authors_csv, write_quotes, write_quotes_csv,
    write_row,
};
pub use summary::{format_summary, print_summary, HarvestSummary};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
