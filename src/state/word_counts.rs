//! Running word tally shared by all tasks of a crawl run

use dashmap::DashMap;
use std::collections::HashMap;

/// Concurrent word -> occurrence count mapping
///
/// Merging is addition, so contributions from different pages commute and
/// writers only ever contend on the shard holding the word being updated.
#[derive(Debug, Default)]
pub struct WordCounts {
    counts: DashMap<String, usize>,
}

impl WordCounts {
    /// Creates an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `word`
    pub fn add(&self, word: &str, count: usize) {
        match self.counts.get_mut(word) {
            Some(mut existing) => *existing += count,
            None => *self.counts.entry(word.to_string()).or_insert(0) += count,
        }
    }

    /// Merges one page's word counts into the tally
    pub fn merge(&self, page_counts: &HashMap<String, usize>) {
        for (word, count) in page_counts {
            self.add(word, *count);
        }
    }

    /// Current count for a word, if it has been seen
    pub fn get(&self, word: &str) -> Option<usize> {
        self.counts.get(word).map(|count| *count)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Copies the tally into a plain map
    ///
    /// Only meaningful once every writer has finished; a snapshot taken while
    /// tasks are still merging may reflect a partial set of pages.
    pub fn snapshot(&self) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
