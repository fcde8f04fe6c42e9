//! Crawl result type and its JSON form

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// The outcome of one crawl run
///
/// Serializes as `{"wordCounts": {...}, "urlsVisited": n}`, with the
/// `wordCounts` object keeping popularity order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    #[serde(serialize_with = "serialize_ranked")]
    word_counts: Vec<(String, usize)>,

    urls_visited: usize,

    #[serde(skip)]
    failed_fetches: usize,
}

impl CrawlResult {
    /// Creates a result from an already ranked word list
    pub fn new(
        word_counts: Vec<(String, usize)>,
        urls_visited: usize,
        failed_fetches: usize,
    ) -> Self {
        Self {
            word_counts,
            urls_visited,
            failed_fetches,
        }
    }

    /// Popular words in ranked order
    pub fn word_counts(&self) -> &[(String, usize)] {
        &self.word_counts
    }

    /// Number of distinct URLs the run claimed
    pub fn urls_visited(&self) -> usize {
        self.urls_visited
    }

    /// Number of visited URLs whose page could not be fetched or parsed
    pub fn failed_fetches(&self) -> usize {
        self.failed_fetches
    }
}

fn serialize_ranked<S>(entries: &[(String, usize)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (word, count) in entries {
        map.serialize_entry(word, count)?;
    }
    map.end()
}
