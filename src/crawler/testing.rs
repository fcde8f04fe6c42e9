//! In-memory page parser for crawl engine tests

use crate::crawler::parser::{PageParser, ParsedPage};
use crate::CrawlerError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Serves a fixed link graph and records every parse call
#[derive(Default)]
pub(crate) struct StaticPageParser {
    pages: HashMap<String, ParsedPage>,
    panics: HashSet<String>,
    delay: Option<Duration>,
    calls: DashMap<String, usize>,
}

impl StaticPageParser {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a page; URLs without a page fail to parse
    pub(crate) fn page(mut self, url: &str, words: &[(&str, usize)], links: &[&str]) -> Self {
        let page = ParsedPage {
            word_counts: words
                .iter()
                .map(|(word, count)| (word.to_string(), *count))
                .collect(),
            links: links.iter().map(|link| link.to_string()).collect(),
        };
        self.pages.insert(url.to_string(), page);
        self
    }

    pub(crate) fn panic_on(mut self, url: &str) -> Self {
        self.panics.insert(url.to_string());
        self
    }

    /// Every parse sleeps for `delay` (tokio time) before answering
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self, url: &str) -> usize {
        self.calls.get(url).map(|count| *count).unwrap_or(0)
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }
}

#[async_trait]
impl PageParser for StaticPageParser {
    async fn parse(&self, url: &str) -> Result<ParsedPage, CrawlerError> {
        *self.calls.entry(url.to_string()).or_insert(0) += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.panics.contains(url) {
            panic!("parser blew up on {}", url);
        }

        self.pages.get(url).cloned().ok_or_else(|| CrawlerError::Fetch {
            url: url.to_string(),
            reason: "HTTP 404".to_string(),
        })
    }
}
