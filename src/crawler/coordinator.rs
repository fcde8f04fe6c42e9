//! Crawler coordinator - crawl orchestration
//!
//! This module contains the entry point of a crawl run:
//! - Computing the run deadline
//! - Sizing the worker pool against the host
//! - Launching one task tree per start page and waiting for all of them
//! - Ranking the collected word counts into the final result

use crate::config::CrawlerConfig;
use crate::crawler::parser::PageParser;
use crate::crawler::task::{crawl_task, join_all, RunContext};
use crate::output::{rank, CrawlResult};
use crate::url::IgnoreRules;
use crate::{ConfigError, CrawlerError};
use async_trait::async_trait;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Upper bound on a run's time budget; longer timeouts are clamped to it
const MAX_TIMEOUT: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// A web crawler
///
/// The crawl operation sits behind this trait so it can be decorated (see
/// [`crate::profiler::Profiler::wrap`]) without the implementation knowing.
#[async_trait]
pub trait WebCrawler: Send + Sync {
    /// Crawls outward from the starting URLs and reports what was found
    async fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlerError>;

    /// Maximum number of workers this crawler can usefully run at once
    fn max_parallelism(&self) -> usize;
}

/// Resolved settings for a crawl
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Wall-clock budget for the whole crawl
    pub timeout: Duration,

    /// Maximum number of link hops from a start page (start pages are hop 1)
    pub max_depth: u32,

    /// Number of words kept in the result
    pub popular_word_count: usize,

    /// Requested number of workers; capped at the host's parallelism
    pub parallelism: usize,

    /// URL patterns that are never fetched
    pub ignored_urls: Vec<String>,
}

impl CrawlSettings {
    /// Builds settings from the crawler section of the configuration
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_seconds),
            max_depth: config.max_depth,
            popular_word_count: config.popular_word_count,
            parallelism: config.parallelism.unwrap_or_else(host_parallelism),
            ignored_urls: config.ignored_urls.clone(),
        }
    }
}

/// Number of threads the host can run in parallel
pub fn host_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Crawler that runs every page as its own task on a bounded worker pool
pub struct ParallelCrawler {
    timeout: Duration,
    max_depth: u32,
    popular_word_count: usize,
    pool_size: usize,
    ignored_urls: Arc<IgnoreRules>,
    parser: Arc<dyn PageParser>,
}

impl ParallelCrawler {
    /// Creates a crawler, rejecting settings that could never crawl
    ///
    /// # Arguments
    ///
    /// * `settings` - The resolved crawl settings
    /// * `parser` - Turns URLs into word counts and links
    ///
    /// # Returns
    ///
    /// * `Ok(ParallelCrawler)` - Ready to crawl
    /// * `Err(ConfigError)` - Zero depth, zero parallelism or a malformed ignore pattern
    pub fn new(settings: CrawlSettings, parser: Arc<dyn PageParser>) -> Result<Self, ConfigError> {
        if settings.max_depth < 1 {
            return Err(ConfigError::Validation(format!(
                "max_depth must be >= 1, got {}",
                settings.max_depth
            )));
        }

        if settings.parallelism < 1 {
            return Err(ConfigError::Validation(format!(
                "parallelism must be >= 1, got {}",
                settings.parallelism
            )));
        }

        let ignored_urls = IgnoreRules::compile(&settings.ignored_urls)?;

        Ok(Self {
            timeout: settings.timeout.min(MAX_TIMEOUT),
            max_depth: settings.max_depth,
            popular_word_count: settings.popular_word_count,
            pool_size: settings.parallelism.min(host_parallelism()),
            ignored_urls: Arc::new(ignored_urls),
            parser,
        })
    }

    /// Number of worker slots each crawl runs with
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }
}

#[async_trait]
impl WebCrawler for ParallelCrawler {
    async fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlerError> {
        let started = Instant::now();
        let ctx = Arc::new(RunContext::new(
            started + self.timeout,
            Arc::clone(&self.ignored_urls),
            Arc::clone(&self.parser),
            self.pool_size,
        ));

        tracing::info!(
            "Starting crawl of {} start pages (max depth {}, {} workers, timeout {:?})",
            starting_urls.len(),
            self.max_depth,
            self.pool_size,
            self.timeout
        );

        let mut roots = JoinSet::new();
        for url in starting_urls {
            roots.spawn(crawl_task(Arc::clone(&ctx), url.clone(), self.max_depth));
        }

        if let Err(e) = join_all(roots).await {
            tracing::error!("Crawl aborted after {:?}: {}", started.elapsed(), e);
            return Err(e);
        }

        let urls_visited = ctx.visited.len();
        let failed_fetches = ctx.failed_fetches();

        let word_counts = if ctx.counts.is_empty() {
            Vec::new()
        } else {
            rank(&ctx.counts.snapshot(), self.popular_word_count)
        };

        tracing::info!(
            "Crawl completed in {:?}: {} URLs visited, {} distinct words, {} failed fetches",
            started.elapsed(),
            urls_visited,
            ctx.counts.len(),
            failed_fetches
        );

        Ok(CrawlResult::new(word_counts, urls_visited, failed_fetches))
    }

    fn max_parallelism(&self) -> usize {
        host_parallelism()
    }
}
