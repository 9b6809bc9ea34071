//! Integration tests for the harvester
//!
//! These tests use wiremock to serve listing and author pages and run the
//! real HTTP fetcher end-to-end.

use quote_harvest::config::{Config, UserAgentConfig};
use quote_harvest::crawler::{BiographyCache, Harvester, HttpFetcher, BIOGRAPHY_NOT_FOUND};
use quote_harvest::output::parse_rows;
use quote_harvest::HarvestError;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EMPTY_PAGE: &str =
    r#"<html><body><div class="col-md-8">No quotes found!<div></div></div></body></html>"#;

fn quote_block(text: &str, author: &str, slug: &str, tags: &[&str]) -> String {
    let tag_links: String = tags
        .iter()
        .map(|t| format!(r#"<a class="tag" href="/tag/{0}/page/1/">{0}</a>"#, t))
        .collect();
    format!(
        r#"<div class="quote" itemscope itemtype="http://schema.org/CreativeWork">
            <span class="text" itemprop="text">{}</span>
            <span>by <small class="author" itemprop="author">{}</small>
            <a href="/author/{}">(about)</a></span>
            <div class="tags">Tags: {}</div>
        </div>"#,
        text, author, slug, tag_links
    )
}

fn listing(blocks: &[String]) -> String {
    format!(
        r#"<html><head><title>Quotes to Scrape</title></head><body><div class="col-md-8">{}</div></body></html>"#,
        blocks.concat()
    )
}

fn author_page(name: &str, description: &str) -> String {
    format!(
        r#"<html><body><div class="author-details">
            <h3 class="author-title">{}</h3>
            <div class="author-description">
                {}
            </div></div></body></html>"#,
        name, description
    )
}

const USER_AGENT: &str = "TestBot/1.0.0";

/// Mounts a page that only answers requests carrying the configured user agent
async fn mount_page(server: &MockServer, route: &str, body: String, expected: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("user-agent", USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(expected)
        .mount(server)
        .await;
}

fn test_user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        timeout_secs: 10,
    }
}

fn harvester(server: &MockServer) -> Harvester<HttpFetcher> {
    let fetcher = HttpFetcher::new(&test_user_agent()).expect("Failed to build fetcher");
    let base_url = Url::parse(&format!("{}/", server.uri())).expect("Failed to parse base URL");
    Harvester::new(fetcher, base_url)
}

/// Page 1: two quotes by A and one by B; page 2 empty
async fn mount_small_site(server: &MockServer) {
    mount_page(
        server,
        "/page/1/",
        listing(&[
            quote_block("“First by A.”", "Author A", "Author-A", &["life"]),
            quote_block("“Second by A.”", "Author A", "Author-A", &[]),
            quote_block("“Only by B.”", "Author B", "Author-B", &["life", "it's"]),
        ]),
        1,
    )
    .await;
    mount_page(server, "/page/2/", EMPTY_PAGE.to_string(), 1).await;
    mount_page(server, "/author/Author-A", author_page("Author A", "A was born."), 1).await;
    mount_page(server, "/author/Author-B", author_page("Author B", "B was born."), 1).await;
}

#[tokio::test]
async fn test_full_harvest_small_site() {
    let mock_server = MockServer::start().await;
    mount_small_site(&mock_server).await;

    let mut cache = BiographyCache::new();
    let harvest = harvester(&mock_server)
        .run(&mut cache)
        .await
        .expect("Harvest failed");

    assert_eq!(harvest.quotes.len(), 3);
    assert_eq!(harvest.quotes[0].text, "“First by A.”");
    assert_eq!(harvest.quotes[2].tags, vec!["life", "it's"]);

    assert_eq!(harvest.authors.len(), 2);
    assert_eq!(harvest.authors[0].author, "Author A");
    assert_eq!(harvest.authors[0].bio, "A was born.");
    assert_eq!(harvest.authors[1].author, "Author B");

    // Two distinct biography URLs, so two fetches rather than three
    assert_eq!(harvest.summary.biography_fetches, 2);
    assert_eq!(harvest.summary.cache_hits, 1);
    assert_eq!(harvest.summary.pages_fetched, 2);

    // Mock expectations (one request per route) are verified on drop
}

#[tokio::test]
async fn test_missing_description_resolves_to_placeholder() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/page/1/",
        listing(&[quote_block("“Mystery.”", "Nobody", "Nobody", &[])]),
        1,
    )
    .await;
    mount_page(&mock_server, "/page/2/", EMPTY_PAGE.to_string(), 1).await;
    mount_page(
        &mock_server,
        "/author/Nobody",
        "<html><body><h3 class=\"author-title\">Nobody</h3></body></html>".to_string(),
        1,
    )
    .await;

    let mut cache = BiographyCache::new();
    let harvest = harvester(&mock_server).run(&mut cache).await.unwrap();

    assert_eq!(harvest.authors.len(), 1);
    assert_eq!(harvest.authors[0].bio, BIOGRAPHY_NOT_FOUND);
}

#[tokio::test]
async fn test_server_error_aborts_harvest() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/page/1/",
        listing(&[quote_block("“Fine.”", "Author A", "Author-A", &[])]),
        1,
    )
    .await;
    mount_page(&mock_server, "/author/Author-A", author_page("Author A", "Bio."), 1).await;
    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut cache = BiographyCache::new();
    let result = harvester(&mock_server).run(&mut cache).await;

    match result {
        Err(HarvestError::Status { url, status }) => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/page/2/"));
        }
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_run_with_config_writes_csv_files() {
    let mock_server = MockServer::start().await;
    mount_small_site(&mock_server).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let quotes_path = dir.path().join("quotes.csv");
    let authors_path = dir.path().join("authors.csv");

    let mut config = Config::default();
    config.site.base_url = mock_server.uri();
    config.user_agent = test_user_agent();
    config.output.quotes_path = quotes_path.display().to_string();
    config.output.authors_path = Some(authors_path.display().to_string());

    let harvest = quote_harvest::run_with_config(&config)
        .await
        .expect("Harvest failed");

    let quotes_csv = std::fs::read_to_string(&quotes_path).expect("Missing quotes file");
    let rows = parse_rows(&quotes_csv);
    assert_eq!(rows[0], vec!["text", "author", "tags"]);
    assert_eq!(rows.len() - 1, harvest.quotes.len());
    for (row, quote) in rows[1..].iter().zip(&harvest.quotes) {
        assert_eq!(row[0], quote.text);
        assert_eq!(row[1], quote.author);
    }
    assert_eq!(rows[1][2], "['life']");
    assert_eq!(rows[2][2], "[]");
    assert_eq!(rows[3][2], "['life', 'it's']");

    let authors_csv = std::fs::read_to_string(&authors_path).expect("Missing authors file");
    let author_rows = parse_rows(&authors_csv);
    assert_eq!(
        author_rows,
        vec![
            vec!["author", "bio"],
            vec!["Author A", "A was born."],
            vec!["Author B", "B was born."],
        ]
    );
}

#[tokio::test]
async fn test_failed_harvest_writes_nothing() {
    let mock_server = MockServer::start().await;
    // Nothing mounted: page 1 is a 404

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let quotes_path = dir.path().join("quotes.csv");

    let mut config = Config::default();
    config.site.base_url = mock_server.uri();
    config.user_agent = test_user_agent();
    config.output.quotes_path = quotes_path.display().to_string();

    let result = quote_harvest::run_with_config(&config).await;

    assert!(matches!(result, Err(HarvestError::Status { status: 404, .. })));
    assert!(!quotes_path.exists());
}

#[tokio::test]
async fn test_failed_quotes_write_leaves_no_authors_file() {
    let mock_server = MockServer::start().await;
    mount_small_site(&mock_server).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let quotes_path = dir.path().join("missing-dir").join("quotes.csv");
    let authors_path = dir.path().join("authors.csv");

    let mut config = Config::default();
    config.site.base_url = mock_server.uri();
    config.user_agent = test_user_agent();
    config.output.quotes_path = quotes_path.display().to_string();
    config.output.authors_path = Some(authors_path.display().to_string());

    let result = quote_harvest::run_with_config(&config).await;

    assert!(matches!(result, Err(HarvestError::Output(_))));
    assert!(!authors_path.exists());
    assert!(!quotes_path.exists());
}
