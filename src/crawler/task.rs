//! The recursive unit of crawl work
//!
//! One task handles one URL. After fetching its page it spawns one child task
//! per outbound link and only finishes once every child has finished, so the
//! tasks of a run form a tree rooted at the start pages.

use crate::crawler::parser::PageParser;
use crate::state::{VisitedSet, WordCounts};
use crate::url::IgnoreRules;
use crate::CrawlerError;
use futures::future::{BoxFuture, FutureExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// State shared by every task of one crawl run
///
/// Created by the crawler at the start of a run and dropped when the run
/// returns; nothing in here outlives a single `crawl` call.
pub(crate) struct RunContext {
    /// No new fetch starts at or after this instant
    pub(crate) deadline: Instant,
    pub(crate) ignored_urls: Arc<IgnoreRules>,
    pub(crate) parser: Arc<dyn PageParser>,
    /// One permit per worker slot
    pub(crate) workers: Semaphore,
    pub(crate) visited: VisitedSet,
    pub(crate) counts: WordCounts,
    pub(crate) failed_fetches: AtomicUsize,
}

impl RunContext {
    pub(crate) fn new(
        deadline: Instant,
        ignored_urls: Arc<IgnoreRules>,
        parser: Arc<dyn PageParser>,
        workers: usize,
    ) -> Self {
        Self {
            deadline,
            ignored_urls,
            parser,
            workers: Semaphore::new(workers),
            visited: VisitedSet::new(),
            counts: WordCounts::new(),
            failed_fetches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failed_fetches(&self) -> usize {
        self.failed_fetches.load(Ordering::Relaxed)
    }
}

/// Crawls `url` and, recursively, everything reachable from it within
/// `remaining_depth` hops
///
/// The task stops without doing anything when:
/// 1. the depth budget is exhausted,
/// 2. the run deadline has been reached,
/// 3. the URL matches an ignore rule,
/// 4. the URL was already claimed by this or another task.
///
/// A page that fails to fetch counts as visited but contributes no words and
/// no links. Only a failure of the task machinery itself (a closed worker
/// pool or a panicking child) is returned as an error.
pub(crate) fn crawl_task(
    ctx: Arc<RunContext>,
    url: String,
    remaining_depth: u32,
) -> BoxFuture<'static, Result<(), CrawlerError>> {
    async move {
        if remaining_depth == 0 {
            tracing::trace!("Depth budget exhausted at {}", url);
            return Ok(());
        }

        let page = {
            // The slot is held for the checks and the fetch, never while
            // waiting on children
            let _slot = ctx
                .workers
                .acquire()
                .await
                .map_err(|_| CrawlerError::PoolClosed)?;

            if Instant::now() >= ctx.deadline {
                tracing::trace!("Deadline reached, not fetching {}", url);
                return Ok(());
            }

            if ctx.ignored_urls.matches(&url) {
                tracing::debug!("Ignoring {}", url);
                return Ok(());
            }

            if !ctx.visited.try_visit(&url) {
                tracing::trace!("Already visited {}", url);
                return Ok(());
            }

            match ctx.parser.parse(&url).await {
                Ok(page) => page,
                Err(e) => {
                    ctx.failed_fetches.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!("Failed to parse {}: {}", url, e);
                    return Ok(());
                }
            }
        };

        ctx.counts.merge(&page.word_counts);
        tracing::debug!(
            "Parsed {} ({} distinct words, {} links, depth budget {})",
            url,
            page.word_counts.len(),
            page.links.len(),
            remaining_depth
        );

        // Children of the last hop would stop on the depth check
        if remaining_depth == 1 || page.links.is_empty() {
            return Ok(());
        }

        let mut children = JoinSet::new();
        for link in page.links {
            children.spawn(crawl_task(Arc::clone(&ctx), link, remaining_depth - 1));
        }

        join_all(children).await
    }
    .boxed()
}

/// Waits for every task in the set, failing on the first broken one
///
/// Returning early drops the set, which aborts the remaining tasks.
pub(crate) async fn join_all(
    mut tasks: JoinSet<Result<(), CrawlerError>>,
) -> Result<(), CrawlerError> {
    while let Some(joined) = tasks.join_next().await {
        joined.map_err(|e| CrawlerError::TaskFailed(e.to_string()))??;
    }
    Ok(())
}
