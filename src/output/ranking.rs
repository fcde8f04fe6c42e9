//! Popular-word ranking
//!
//! Turns the raw word tally of a crawl into the bounded, ordered list that is
//! reported to the user.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Orders two `(word, count)` entries by popularity
///
/// Higher counts come first; equal counts put longer words first; words of
/// equal length fall back to lexicographic order.
pub fn compare_popularity(a: (&str, usize), b: (&str, usize)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
        .then_with(|| a.0.cmp(b.0))
}

/// Selects the `limit` most popular words
///
/// The result is always in popularity order (see [`compare_popularity`]) and
/// holds at most `limit` entries. The ordering is total, so the same tally
/// always produces the same list.
///
/// # Example
///
/// ```
/// use parcrawl::output::rank;
/// use std::collections::HashMap;
///
/// let counts = HashMap::from([
///     ("x".to_string(), 3),
///     ("y".to_string(), 4),
///     ("zz".to_string(), 3),
/// ]);
///
/// let popular = rank(&counts, 2);
/// assert_eq!(popular, vec![("y".to_string(), 4), ("zz".to_string(), 3)]);
/// ```
pub fn rank(counts: &HashMap<String, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<(&str, usize)> = counts
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .collect();

    entries.sort_unstable_by(|a, b| compare_popularity(*a, *b));

    entries
        .into_iter()
        .take(limit)
        .map(|(word, count)| (word.to_string(), count))
        .collect()
}
