//! Quote-Harvest main entry point
//!
//! This is the command-line interface for the Quote-Harvest crawler.

use clap::Parser;
use std::path::PathBuf;
use quote_harvest::config::{load_config, Config, Overrides};
use quote_harvest::output::print_summary;
use tracing_subscriber::EnvFilter;

/// Quote-Harvest: collect quotations and author biographies as CSV
///
/// Walks the numbered listing pages of a quotations site until a page has no
/// quotes, resolving each author's biography once, and writes every quote to
/// a CSV file.
#[derive(Parser, Debug)]
#[command(name = "quote-harvest")]
#[command(version)]
#[command(about = "Collect quotations and author biographies as CSV", long_about = None)]
struct Cli {
    /// Path of the quotes CSV file (overrides the config file)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Root URL of the site to crawl (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Also write distinct author biographies to this CSV file
    #[arg(long, value_name = "FILE")]
    authors: Option<PathBuf>,

    /// Print a summary of the harvest when done
    #[arg(long)]
    summary: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Harvesting {} into {}",
        config.site.base_url,
        config.output.quotes_path
    );

    match quote_harvest::run_with_config(&config).await {
        Ok(harvest) => {
            tracing::info!("Harvest completed successfully");
            if cli.summary {
                print_summary(&harvest.summary);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quote_harvest=info,warn"),
            1 => EnvFilter::new("quote_harvest=debug,info"),
            2 => EnvFilter::new("quote_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if given, then applies command-line overrides
fn build_config(cli: &Cli) -> Result<Config, quote_harvest::ConfigError> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    config.with_overrides(&Overrides {
        output: cli.output.clone(),
        authors: cli.authors.clone(),
        base_url: cli.base_url.clone(),
    })
}
