//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end through the HTTP fetcher.

use locality_crawler::config::Config;
use locality_crawler::crawler::{
    cache_file_name, run_crawl, Fetcher, HtmlLinkExtractor, HttpFetcher, TraversalEngine,
};
use locality_crawler::{CrawlError, EngineState, FetchError};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration that caches pages in `dir`
fn create_test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.crawler.webpages_dir = dir.display().to_string();
    config.fetcher.timeout_secs = 5;
    config
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_writes_report() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
            <a href="/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            <a href="javascript:void(0)">Menu</a>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_page(
        &mock_server,
        "/page1",
        r#"<html><body><a href="/">Home</a><a href="page2">Page 2</a></body></html>"#.to_string(),
    )
    .await;
    mount_page(
        &mock_server,
        "/page2",
        "<html><body>No links</body></html>".to_string(),
    )
    .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(dir.path());

    let outcome = run_crawl(&format!("{}/", base_url), 2, &config)
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.report_path, dir.path().join("crawl_res.csv"));
    assert_eq!(outcome.results.len(), 3);
    assert_eq!(outcome.statistics.links_filtered, 1);
    assert_eq!(outcome.statistics.links_new, 2);
    assert_eq!(outcome.statistics.links_duplicate, 2);

    let report = std::fs::read_to_string(&outcome.report_path).expect("Report missing");
    let expected = format!(
        "url, depth, ratio\n{base}/\t1\t1\n{base}/page1\t1\t2\n{base}/page2\t0\t2\n",
        base = base_url
    );
    assert_eq!(report, expected);
}

#[tokio::test]
async fn test_crawl_with_depth_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Create a chain: / -> level1 -> level2 -> level3
    mount_page(&mock_server, "/", format!(r#"<a href="{}/level1">1</a>"#, base_url)).await;
    mount_page(&mock_server, "/level1", format!(r#"<a href="{}/level2">2</a>"#, base_url)).await;

    Mock::given(method("GET"))
        .and(path("/level2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<a href="/level3">3</a>"#))
        .expect(0) // Beyond max depth, should never be fetched
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(dir.path());

    let outcome = run_crawl(&format!("{}/", base_url), 2, &config)
        .await
        .expect("Crawl failed");

    let depths: Vec<_> = outcome
        .results
        .records()
        .iter()
        .map(|r| (r.url.clone(), r.depth))
        .collect();
    assert_eq!(
        depths,
        vec![(format!("{}/", base_url), 1), (format!("{}/level1", base_url), 2)]
    );
}

#[tokio::test]
async fn test_failed_pages_are_left_out_of_report() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/missing">Gone</a><a href="/error">Broken</a><a href="/ok">Fine</a>"#
            .to_string(),
    )
    .await;
    mount_page(&mock_server, "/ok", "<p>ok</p>".to_string()).await;

    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    // /missing falls through to wiremock's default 404

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(dir.path());

    let outcome = run_crawl(&format!("{}/", base_url), 3, &config)
        .await
        .expect("Crawl failed");

    let urls: Vec<_> = outcome.results.records().iter().map(|r| r.url.clone()).collect();
    assert_eq!(urls, vec![format!("{}/", base_url), format!("{}/ok", base_url)]);
    assert_eq!(outcome.statistics.pages_failed, 2);
    assert_eq!(outcome.statistics.depths_crawled, 2);
}

#[tokio::test]
async fn test_pages_are_cached_by_url_hash() {
    let mock_server = MockServer::start().await;
    let seed = format!("{}/", mock_server.uri());

    mount_page(&mock_server, "/", "<html><body>cached</body></html>".to_string()).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(dir.path());

    run_crawl(&seed, 1, &config).await.expect("Crawl failed");

    let cached = dir.path().join(cache_file_name(&seed));
    let content = std::fs::read_to_string(cached).expect("Page was not cached");
    assert_eq!(content, "<html><body>cached</body></html>");
}

#[tokio::test]
async fn test_http_fetcher_reports_status_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teapot"))
        .respond_with(ResponseTemplate::new(418))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(dir.path());
    let fetcher = HttpFetcher::new(&config.fetcher, dir.path()).expect("Failed to build fetcher");

    let result = fetcher.fetch(&format!("{}/teapot", mock_server.uri())).await;

    assert!(matches!(result, Err(FetchError::Status { status: 418, .. })));
}

#[tokio::test]
async fn test_engine_over_http_with_unreachable_link() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Port 1 on localhost refuses connections
    mount_page(
        &mock_server,
        "/",
        r#"<a href="http://127.0.0.1:1/nowhere">Dead</a><a href="/next">Next</a>"#.to_string(),
    )
    .await;
    mount_page(&mock_server, "/next", String::new()).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(dir.path());
    let fetcher = HttpFetcher::new(&config.fetcher, dir.path()).expect("Failed to build fetcher");

    let seed = format!("{}/", base_url);
    let mut engine =
        TraversalEngine::from_config(&seed, 2, &config.crawler, fetcher, HtmlLinkExtractor);
    engine.crawl().await.expect("Crawl failed");

    assert_eq!(engine.state(), EngineState::Done);
    assert_eq!(engine.results().len(), 2);
    assert_eq!(engine.results().records()[0].rank, 0.5);
    assert_eq!(engine.statistics().pages_failed, 1);
    assert!(!engine.frontier().is_visited("http://127.0.0.1:1/nowhere"));
}

#[tokio::test]
async fn test_seed_without_trailing_slash_is_recorded_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/">Home</a><a href="/about">About</a>"#.to_string(),
    )
    .await;
    mount_page(&mock_server, "/about", r#"<a href="/">Home</a>"#.to_string()).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(dir.path());

    let outcome = run_crawl(&base_url, 2, &config).await.expect("Crawl failed");

    let urls: Vec<_> = outcome.results.records().iter().map(|r| r.url.clone()).collect();
    assert_eq!(urls, vec![format!("{}/", base_url), format!("{}/about", base_url)]);
    assert_eq!(outcome.statistics.links_duplicate, 2);
}

#[tokio::test]
async fn test_unreachable_seed_aborts_crawl() {
    let mock_server = MockServer::start().await;
    let seed = format!("{}/", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1) // Only the reachability check, the crawl never starts
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(dir.path());

    let result = run_crawl(&seed, 2, &config).await;

    match result {
        Err(CrawlError::UnreachableSeed { url, source }) => {
            assert_eq!(url, seed);
            assert!(matches!(source, FetchError::Status { status: 404, .. }));
        }
        other => panic!("Expected UnreachableSeed, got {:?}", other.map(|o| o.results.len())),
    }
    assert!(!dir.path().join("crawl_res.csv").exists());
}

#[tokio::test]
async fn test_invalid_seed_is_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(dir.path());

    let result = run_crawl("http://", 1, &config).await;

    assert!(matches!(result, Err(CrawlError::UrlError(_))));
}
