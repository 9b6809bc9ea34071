//! End-of-run harvest statistics

/// Counters collected while a harvest runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Listing pages fetched, including the final empty one
    pub pages_fetched: u64,

    /// Quotes collected
    pub quotes: u64,

    /// Distinct author biographies collected
    pub distinct_authors: u64,

    /// Biography pages actually fetched
    pub biography_fetches: u64,

    /// Biography lookups answered from the cache
    pub cache_hits: u64,
}

impl HarvestSummary {
    /// Creates a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Total HTTP requests issued by the run
    pub fn total_requests(&self) -> u64 {
        self.pages_fetched + self.biography_fetches
    }

    /// Share of biography lookups served from the cache, as a percentage
    pub fn cache_hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.biography_fetches;
        if lookups == 0 {
            return 0.0;
        }
        (self.cache_hits as f64 / lookups as f64) * 100.0
    }
}

/// Formats a summary for terminal output
pub fn format_summary(summary: &HarvestSummary) -> String {
    let mut out = String::new();

    out.push_str("=== Harvest Summary ===\n\n");
    out.push_str(&format!("  Listing pages fetched: {}\n", summary.pages_fetched));
    out.push_str(&format!("  Quotes collected: {}\n", summary.quotes));
    out.push_str(&format!("  Distinct authors: {}\n", summary.distinct_authors));
    out.push_str(&format!(
        "  Biography fetches: {} ({} cache hits, {:.1}%)\n",
        summary.biography_fetches,
        summary.cache_hits,
        summary.cache_hit_rate()
    ));
    out.push_str(&format!("  Total requests: {}\n", summary.total_requests()));

    out
}

/// Prints a summary to stdout
pub fn print_summary(summary: &HarvestSummary) {
    print!("{}", format_summary(summary));
}
