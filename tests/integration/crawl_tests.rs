//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use parcrawl::config::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use parcrawl::crawler::{build_crawler, crawl, HttpPageParser, PageParser, WebCrawler};
use parcrawl::output::write_result;
use parcrawl::profiler::Profiler;
use parcrawl::url::IgnoreRules;
use parcrawl::CrawlerError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling the given start pages
fn create_test_config(start_pages: Vec<String>, max_depth: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            start_pages,
            max_depth,
            timeout_seconds: 30,
            popular_word_count: 3,
            parallelism: Some(4),
            ignored_urls: vec![],
            ignored_words: vec![],
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig::default(),
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_raw(format!("<html><body>{}</body></html>", body), "text/html")
}

/// Mounts a page at `route` answering GET with the given body
async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        &format!(
            r#"<p>rust rust</p><a href="{0}/page1">one</a> <a href="/page2">two</a>"#,
            base_url
        ),
    )
    .await;
    mount_page(&mock_server, "/page1", "<p>rust crawler</p>").await;
    mount_page(&mock_server, "/page2", "<p>crawler threads</p>").await;

    let config = create_test_config(vec![format!("{}/", base_url)], 2);
    let result = crawl(&config).await.expect("Crawl failed");

    assert_eq!(result.urls_visited(), 3);
    assert_eq!(result.failed_fetches(), 0);
    assert_eq!(
        result.word_counts(),
        &[
            ("rust".to_string(), 3),
            ("crawler".to_string(), 2),
            ("threads".to_string(), 1),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_page_fetched_once() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/a", r#"<p>alpha</p><a href="/shared">shared</a>"#).await;
    mount_page(&mock_server, "/b", r#"<p>beta</p><a href="/shared">shared</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(html_page("<p>common</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let config = create_test_config(
        vec![format!("{}/a", base_url), format!("{}/b", base_url)],
        3,
    );
    let result = crawl(&config).await.expect("Crawl failed");

    assert_eq!(result.urls_visited(), 3);
    let common = result
        .word_counts()
        .iter()
        .find(|(word, _)| word == "common")
        .map(|(_, count)| *count);
    assert_eq!(common, Some(1));

    // Verifies the expect(1) on /shared when the server drops
    mock_server.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failed_pages_do_not_stop_the_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<p>home</p>
            <a href="/missing">gone</a> <a href="/file.pdf">pdf</a> <a href="/ok">ok</a>"#,
    )
    .await;
    mount_page(&mock_server, "/ok", "<p>fine</p>").await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/file.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![format!("{}/", mock_server.uri())], 2);
    let result = crawl(&config).await.expect("Crawl failed");

    assert_eq!(result.urls_visited(), 4);
    assert_eq!(result.failed_fetches(), 2);
    let words: Vec<&str> = result.word_counts().iter().map(|(w, _)| w.as_str()).collect();
    assert!(words.contains(&"home"));
    assert!(words.contains(&"fine"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_ignored_urls_and_words() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<p>the crawler and the pages</p>
            <a href="/private/secret">secret</a> <a href="/public">public</a>"#,
    )
    .await;
    mount_page(&mock_server, "/public", "<p>visible pages</p>").await;

    Mock::given(method("GET"))
        .and(path("/private/secret"))
        .respond_with(html_page("<p>hidden</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(vec![format!("{}/", mock_server.uri())], 3);
    config.crawler.ignored_urls = vec![".*/private/.*".to_string()];
    config.crawler.ignored_words = vec![".{1,3}".to_string()];

    let result = crawl(&config).await.expect("Crawl failed");

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(
        result.word_counts(),
        &[
            ("pages".to_string(), 2),
            ("crawler".to_string(), 1),
            ("visible".to_string(), 1),
        ]
    );

    mock_server.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_depth_limits_fetches() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<p>zero</p><a href="/one">next</a>"#).await;
    mount_page(&mock_server, "/one", r#"<p>one</p><a href="/two">next</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/two"))
        .respond_with(html_page("<p>two</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![format!("{}/", mock_server.uri())], 2);
    let result = crawl(&config).await.expect("Crawl failed");

    assert_eq!(result.urls_visited(), 2);
    mock_server.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_zero_timeout_visits_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_page("<p>never</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(vec![format!("{}/", mock_server.uri())], 3);
    config.crawler.timeout_seconds = 0;

    let result = crawl(&config).await.expect("Crawl failed");

    assert_eq!(result.urls_visited(), 0);
    assert!(result.word_counts().is_empty());
    mock_server.verify().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_canonical_duplicate_counted_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<p>read</p><a href="/article?ref=home">article</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            format!(
                r#"<html><head><link rel="canonical" href="{}/article"></head>
                <body><p>unique</p></body></html>"#,
                base_url
            ),
            "text/html",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![format!("{}/", base_url)], 3);
    let result = crawl(&config).await.expect("Crawl failed");

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(
        result.word_counts(),
        &[
            ("article".to_string(), 1),
            ("unique".to_string(), 1),
            ("read".to_string(), 1),
        ]
    );
    mock_server.verify().await;
}

#[tokio::test]
async fn test_http_parser_reports_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config(vec![], 1);
    let parser = HttpPageParser::new(&config.user_agent, IgnoreRules::default()).unwrap();

    let result = parser.parse(&format!("{}/down", mock_server.uri())).await;
    assert!(matches!(result, Err(CrawlerError::Fetch { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_profiled_crawl_and_report() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<p>profiled words</p>").await;

    let config = create_test_config(vec![format!("{}/", mock_server.uri())], 1);
    let profiler = Profiler::new();
    let crawler = profiler.wrap(build_crawler(&config).expect("Failed to build crawler"));

    let result = crawler
        .crawl(&config.crawler.start_pages)
        .await
        .expect("Crawl failed");
    assert_eq!(result.urls_visited(), 1);

    let mut result_json = Vec::new();
    write_result(&result, &mut result_json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&result_json).unwrap();
    assert_eq!(value["urlsVisited"], 1);
    assert_eq!(value["wordCounts"]["profiled"], 1);

    let mut report = Vec::new();
    profiler.write_to(&mut report).unwrap();
    let report = String::from_utf8(report).unwrap();
    assert!(report.starts_with("Run at "));
    assert!(report.contains("ParallelCrawler#crawl took "));
}
