//! HTML extraction for listing and biography pages
//!
//! This module turns raw page markup into records:
//! - Listing pages: one `QuoteBlock` per `.quote` element, in document order
//! - Biography pages: the text of the `.author-description` region
//!
//! Extraction is pure. A quote block missing its text, author, or author link
//! is reported as `ExtractError::MissingField`; the driver treats that as fatal.

use crate::model::Quote;
use crate::ExtractError;
use scraper::{ElementRef, Html, Selector};

/// Placeholder biography used when an author page has no description region
pub const BIOGRAPHY_NOT_FOUND: &str = "Biography not found";

/// A quote together with the relative link to its author's biography page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteBlock {
    pub quote: Quote,

    /// The `href` of the first anchor in the block, unresolved
    pub author_href: String,
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector(format!("{}: {:?}", css, e)))
}

/// Parses a listing page and extracts every quote block on it
///
/// # Arguments
///
/// * `html` - The listing page markup
///
/// # Returns
///
/// * `Ok(Vec<QuoteBlock>)` - All quote blocks in document order; empty when
///   the page has none
/// * `Err(ExtractError)` - A quote block was missing an expected field
///
/// # Example
///
/// ```
/// use quote_harvest::crawler::parse_listing;
///
/// let html = r#"<div class="quote">
///     <span class="text">Hello</span>
///     <small class="author">Someone</small>
///     <a href="/author/Someone">(about)</a>
/// </div>"#;
/// let blocks = parse_listing(html).unwrap();
/// assert_eq!(blocks[0].quote.author, "Someone");
/// assert_eq!(blocks[0].author_href, "/author/Someone");
/// ```
pub fn parse_listing(html: &str) -> Result<Vec<QuoteBlock>, ExtractError> {
    let document = Html::parse_document(html);
    let quote_selector = selector(".quote")?;
    let anchor_selector = selector("a")?;

    document
        .select(&quote_selector)
        .map(|element| parse_block(element, &anchor_selector))
        .collect()
}

fn parse_block(element: ElementRef<'_>, anchor: &Selector) -> Result<QuoteBlock, ExtractError> {
    let quote = parse_quote(element)?;
    let author_href = element
        .select(anchor)
        .next()
        .and_then(|a| a.value().attr("href"))
        .ok_or(ExtractError::MissingField { field: "author link" })?
        .to_string();
    Ok(QuoteBlock { quote, author_href })
}

/// Extracts a `Quote` from a single `.quote` element
///
/// Text and author are taken verbatim as displayed. Tags are every `.tag`
/// element in document order.
pub fn parse_quote(element: ElementRef<'_>) -> Result<Quote, ExtractError> {
    let text = first_text(element, ".text")?.ok_or(ExtractError::MissingField { field: "text" })?;
    let author =
        first_text(element, ".author")?.ok_or(ExtractError::MissingField { field: "author" })?;

    let tag_selector = selector(".tag")?;
    let tags = element
        .select(&tag_selector)
        .map(|tag| tag.text().collect::<String>())
        .collect();

    Ok(Quote { text, author, tags })
}

/// Full text of the first descendant matching `css`
fn first_text(element: ElementRef<'_>, css: &str) -> Result<Option<String>, ExtractError> {
    let sel = selector(css)?;
    Ok(element
        .select(&sel)
        .next()
        .map(|found| found.text().collect::<String>()))
}

/// Extracts the biography text from an author page
///
/// Each text fragment of the first `.author-description` element is trimmed
/// and the non-empty fragments are concatenated. Returns `None` when the page
/// has no description region.
pub fn parse_biography(html: &str) -> Result<Option<String>, ExtractError> {
    let document = Html::parse_document(html);
    let description_selector = selector(".author-description")?;

    Ok(document.select(&description_selector).next().map(|element| {
        element
            .text()
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .collect::<String>()
    }))
}
