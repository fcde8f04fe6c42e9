//! URL handling module
//!
//! This module provides start-page validation and the ignore-rule matcher
//! used to exclude URLs (and words) from a crawl.

mod matcher;

pub use matcher::IgnoreRules;

use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a start page and checks that it can be crawled
///
/// Only absolute `http` and `https` URLs are accepted.
///
/// # Examples
///
/// ```
/// use parcrawl::url::parse_start_url;
///
/// assert!(parse_start_url("https://example.com/").is_ok());
/// assert!(parse_start_url("ftp://example.com/").is_err());
/// assert!(parse_start_url("/relative").is_err());
/// ```
pub fn parse_start_url(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UrlError::InvalidScheme(other.to_string())),
    }
}
