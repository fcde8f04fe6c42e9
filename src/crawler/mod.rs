//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and HTML parsing (the page parser)
//! - The recursive per-page crawl task
//! - Overall crawl coordination on a bounded worker pool

mod coordinator;
mod fetcher;
mod parser;
mod task;

#[cfg(test)]
mod testing;

pub use coordinator::{host_parallelism, CrawlSettings, ParallelCrawler, WebCrawler};
pub use fetcher::{build_http_client, fetch_url, user_agent_string, FetchResult};
pub use parser::{parse_html, HttpPageParser, PageParser, ParsedPage};

use crate::config::Config;
use crate::output::CrawlResult;
use crate::url::IgnoreRules;
use crate::CrawlerError;
use std::sync::Arc;

/// Builds the production crawler for a configuration
///
/// The crawler fetches pages over HTTP, dropping the configured ignored
/// words from every page's counts.
///
/// # Arguments
///
/// * `config` - The validated crawler configuration
///
/// # Returns
///
/// * `Ok(ParallelCrawler)` - Crawler ready to run
/// * `Err(CrawlerError)` - Invalid settings or the HTTP client could not be built
pub fn build_crawler(config: &Config) -> Result<ParallelCrawler, CrawlerError> {
    let ignored_words = IgnoreRules::compile(&config.crawler.ignored_words)?;
    let parser = HttpPageParser::new(&config.user_agent, ignored_words)?;
    let crawler = ParallelCrawler::new(
        CrawlSettings::from_config(&config.crawler),
        Arc::new(parser),
    )?;
    Ok(crawler)
}

/// Runs a complete crawl of the configured start pages
///
/// # Example
///
/// ```no_run
/// use parcrawl::config::load_config;
/// use parcrawl::crawler::crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let result = crawl(&config).await?;
/// println!("Visited {} URLs", result.urls_visited());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config) -> Result<CrawlResult, CrawlerError> {
    build_crawler(config)?
        .crawl(&config.crawler.start_pages)
        .await
}
