use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Pages every crawl starts from
    #[serde(rename = "start-pages")]
    pub start_pages: Vec<String>,

    /// Maximum number of link hops to follow from a start page
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget for the whole crawl (seconds)
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Number of words to report in the result
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: usize,

    /// Target number of concurrent workers, defaults to host parallelism
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// URL patterns that are never fetched
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// Word patterns that are never counted
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Where to write the JSON crawl result (stdout when absent)
    #[serde(rename = "result-path", default)]
    pub result_path: Option<String>,

    /// Where to append the profiler report (stdout when absent)
    #[serde(rename = "profile-output-path", default)]
    pub profile_output_path: Option<String>,
}
