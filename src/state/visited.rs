//! Visited-URL tracking for a single crawl run

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The set of URLs a crawl run has claimed
///
/// This is the one critical section of a run: checking whether a URL was
/// already claimed and claiming it happen under the same lock, so two tasks
/// racing on the same URL can never both win.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a URL for the calling task
    ///
    /// # Returns
    ///
    /// * `true` - The URL was not visited before and is now recorded
    /// * `false` - Another task (or an earlier call) already claimed it
    pub fn try_visit(&self, url: &str) -> bool {
        let mut urls = self.lock();
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    /// Returns true if the URL has been claimed
    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Number of distinct URLs claimed so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic elsewhere cannot leave the set half-updated: insert is the only
    // mutation, so the data behind a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
