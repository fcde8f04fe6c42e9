//! State module for tracking crawl progress
//!
//! This module provides the state shared by every task of one crawl run.
//!
//! # Components
//!
//! - `VisitedSet`: exactly-once guard over the URLs a run has claimed
//! - `WordCounts`: concurrent running tally of word occurrences

mod visited;
mod word_counts;

// Re-export main types
pub use visited::VisitedSet;
pub use word_counts::WordCounts;
