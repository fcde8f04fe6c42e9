//! Profiler for timing crawl operations
//!
//! The profiler never reaches into the crawler. [`Profiler::wrap`] returns a
//! decorator that implements [`WebCrawler`] itself, times each `crawl` call
//! and forwards it to the wrapped crawler.
//!
//! # Example
//!
//! ```no_run
//! use parcrawl::config::load_config;
//! use parcrawl::crawler::{build_crawler, WebCrawler};
//! use parcrawl::profiler::Profiler;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(Path::new("config.toml"))?;
//! let profiler = Profiler::new();
//! let crawler = profiler.wrap(build_crawler(&config)?);
//!
//! crawler.crawl(&config.crawler.start_pages).await?;
//! profiler.write_data(Path::new("profile.txt"))?;
//! # Ok(())
//! # }
//! ```

mod state;

pub use state::{format_duration, ProfilingState};

use crate::crawler::WebCrawler;
use crate::output::CrawlResult;
use crate::CrawlerError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Collects timings from every crawler it wraps
pub struct Profiler {
    started_at: DateTime<Utc>,
    state: Arc<ProfilingState>,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    /// Creates a profiler; its report is stamped with the creation time
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Creates a profiler with an explicit report timestamp
    pub fn starting_at(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            state: Arc::new(ProfilingState::new()),
        }
    }

    /// Wraps a crawler so that its `crawl` calls are timed
    pub fn wrap<C: WebCrawler>(&self, delegate: C) -> Profiled<C> {
        Profiled {
            key: format!("{}#crawl", std::any::type_name::<C>()),
            delegate,
            state: Arc::clone(&self.state),
        }
    }

    /// Timing data collected so far
    pub fn state(&self) -> &ProfilingState {
        &self.state
    }

    /// Appends the report to a file, creating it if needed
    pub fn write_data(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        tracing::info!("Appended profiling data to {}", path.display());
        Ok(())
    }

    /// Writes the report: a `Run at <date>` header, the timings, a blank line
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "Run at {}",
            self.started_at.format("%a, %-d %b %Y %H:%M:%S GMT")
        )?;
        self.state.write(writer)?;
        writeln!(writer)?;
        Ok(())
    }
}

/// A crawler whose `crawl` calls are timed by a [`Profiler`]
pub struct Profiled<C> {
    key: String,
    delegate: C,
    state: Arc<ProfilingState>,
}

impl<C> Profiled<C> {
    /// Key the timings of this crawler are recorded under
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn into_inner(self) -> C {
        self.delegate
    }
}

#[async_trait]
impl<C: WebCrawler> WebCrawler for Profiled<C> {
    async fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlerError> {
        let start = Instant::now();
        let result = self.delegate.crawl(starting_urls).await;
        // Failed calls are timed too
        self.state.record(&self.key, start.elapsed());
        result
    }

    fn max_parallelism(&self) -> usize {
        self.delegate.max_parallelism()
    }
}
