//! Page parsing: turning a URL into word counts and outbound links
//!
//! The crawl engine only sees the [`PageParser`] trait. [`HttpPageParser`] is
//! the production implementation: it fetches the page over HTTP and extracts
//! the words and links from the HTML with [`parse_html`].

use crate::config::UserAgentConfig;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::url::IgnoreRules;
use crate::CrawlerError;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use url::Url;

/// Elements whose text never counts as page words
const SKIPPED_TEXT_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Elements that break the surrounding text into separate words
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table",
    "td", "th", "tr", "ul",
];

/// Extracted information from a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Occurrences of each word on the page
    pub word_counts: HashMap<String, usize>,

    /// All links found on the page (absolute URLs)
    pub links: Vec<String>,
}

/// Turns a URL into its page's word counts and outbound links
///
/// Implementations must be shareable across tasks; the crawler calls
/// `parse` concurrently from many workers.
#[async_trait]
pub trait PageParser: Send + Sync {
    /// Fetches and parses one page
    ///
    /// An error means the page contributes nothing to the crawl; it is never
    /// retried.
    async fn parse(&self, url: &str) -> Result<ParsedPage, CrawlerError>;
}

/// Page parser that fetches pages over HTTP
pub struct HttpPageParser {
    client: Client,
    ignored_words: IgnoreRules,
}

impl HttpPageParser {
    /// Creates a parser with its own HTTP client
    ///
    /// # Arguments
    ///
    /// * `user_agent` - Identification sent with every request
    /// * `ignored_words` - Words that are dropped from the counts
    pub fn new(
        user_agent: &UserAgentConfig,
        ignored_words: IgnoreRules,
    ) -> Result<Self, CrawlerError> {
        let client = build_http_client(user_agent)?;
        Ok(Self::with_client(client, ignored_words))
    }

    /// Creates a parser around an existing HTTP client
    pub fn with_client(client: Client, ignored_words: IgnoreRules) -> Self {
        Self {
            client,
            ignored_words,
        }
    }
}

#[async_trait]
impl PageParser for HttpPageParser {
    async fn parse(&self, url: &str) -> Result<ParsedPage, CrawlerError> {
        match fetch_url(&self.client, url).await {
            FetchResult::Success {
                final_url, body, ..
            } => {
                // Relative links resolve against where redirects ended up
                let base_url = Url::parse(&final_url)?;
                Ok(parse_html(&body, &base_url, &self.ignored_words))
            }

            FetchResult::ContentMismatch { content_type } => Err(CrawlerError::Fetch {
                url: url.to_string(),
                reason: format!("Expected HTML, got '{}'", content_type),
            }),

            FetchResult::HttpError { status_code } => Err(CrawlerError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}", status_code),
            }),

            FetchResult::NetworkError { source } => Err(CrawlerError::Http {
                url: url.to_string(),
                source,
            }),
        }
    }
}

/// Parses HTML content and extracts word counts and links
///
/// # Word Extraction Rules
///
/// - Only text inside `<body>` counts; `<script>`, `<style>` and
///   `<noscript>` text is skipped
/// - Inline markup does not split words; block elements such as `<p>`,
///   `<div>` or `<li>` do
/// - Text is split on whitespace, non-alphanumeric characters are removed
///   and the result is lower-cased
/// - Empty words and words fully matching an ignored-word pattern are dropped
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `<link>` elements, including `rel="canonical"`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs and fragment-only links
/// - Anything that is not HTTP(S) after resolution
///
/// Fragments are stripped, so `page#a` and `page#b` are the same link.
///
/// # Example
///
/// ```
/// use parcrawl::crawler::parse_html;
/// use parcrawl::url::IgnoreRules;
/// use url::Url;
///
/// let html = r#"<html><body><p>Hello, hello world!</p><a href="/next">Next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url, &IgnoreRules::default());
///
/// assert_eq!(parsed.word_counts["hello"], 2);
/// assert_eq!(parsed.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, ignored_words: &IgnoreRules) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        word_counts: count_words(&document, ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Counts the words in the document body
fn count_words(document: &Html, ignored_words: &IgnoreRules) -> HashMap<String, usize> {
    let mut counts = HashMap::new();

    let Ok(body_selector) = Selector::parse("body") else {
        return counts;
    };

    for body in document.select(&body_selector) {
        let mut text = String::new();
        collect_text(body, &mut text);

        for raw in text.split_whitespace() {
            let word: String = raw
                .chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect();

            if word.is_empty() || ignored_words.matches(&word) {
                continue;
            }

            *counts.entry(word).or_insert(0) += 1;
        }
    }

    counts
}

/// Appends the visible text under `element` to `out`
///
/// Adjacent inline text is joined as written, so `foo<b>bar</b>` is one word.
/// Block elements are padded with spaces so their text never runs into the
/// text around them.
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }

        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };

        let name = child.value().name();
        if SKIPPED_TEXT_ELEMENTS.contains(&name) {
            continue;
        }

        let block = BLOCK_ELEMENTS.contains(&name);
        if block {
            out.push(' ');
        }
        collect_text(child, out);
        if block {
            out.push(' ');
        }
    }
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url.to_string())
}
