use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::url::{parse_start_url, IgnoreRules};
use crate::{ConfigError, UrlError};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    validate_start_pages(&config.start_pages)?;

    if config.max_depth < 1 {
        return Err(ConfigError::Validation(format!(
            "max_depth must be >= 1, got {}",
            config.max_depth
        )));
    }

    if config.popular_word_count < 1 {
        return Err(ConfigError::Validation(format!(
            "popular_word_count must be >= 1, got {}",
            config.popular_word_count
        )));
    }

    if let Some(parallelism) = config.parallelism {
        if parallelism < 1 {
            return Err(ConfigError::Validation(format!(
                "parallelism must be >= 1, got {}",
                parallelism
            )));
        }
    }

    // Compiled again by the crawler; done here so a bad pattern fails at load time
    IgnoreRules::compile(&config.ignored_urls)?;
    IgnoreRules::compile(&config.ignored_words)?;

    Ok(())
}

/// Validates the start page list
fn validate_start_pages(pages: &[String]) -> Result<(), ConfigError> {
    if pages.is_empty() {
        return Err(ConfigError::Validation(
            "start_pages must contain at least one URL".to_string(),
        ));
    }

    for page in pages {
        parse_start_url(page).map_err(|e| match e {
            UrlError::InvalidScheme(scheme) => ConfigError::Validation(format!(
                "Start page '{}' must use http or https, got '{}'",
                page, scheme
            )),
            other => ConfigError::InvalidUrl(format!("Invalid start page: {}", other)),
        })?;
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if matches!(config.result_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "result_path cannot be empty".to_string(),
        ));
    }

    if matches!(config.profile_output_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "profile_output_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| ConfigError::Validation(format!("Invalid email format: '{}'", email)))?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crawler_config() -> CrawlerConfig {
        CrawlerConfig {
            start_pages: vec!["https://example.com/".to_string()],
            max_depth: 3,
            timeout_seconds: 5,
            popular_word_count: 10,
            parallelism: None,
            ignored_urls: vec![],
            ignored_words: vec![],
        }
    }

    #[test]
    fn test_valid_crawler_config() {
        assert!(validate_crawler_config(&crawler_config()).is_ok());
    }

    #[test]
    fn test_zero_timeout_is_allowed() {
        let mut config = crawler_config();
        config.timeout_seconds = 0;
        assert!(validate_crawler_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_zero_depth() {
        let mut config = crawler_config();
        config.max_depth = 0;
        assert!(matches!(
            validate_crawler_config(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_zero_parallelism() {
        let mut config = crawler_config();
        config.parallelism = Some(0);
        assert!(validate_crawler_config(&config).is_err());

        config.parallelism = Some(16);
        assert!(validate_crawler_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_zero_popular_words() {
        let mut config = crawler_config();
        config.popular_word_count = 0;
        assert!(validate_crawler_config(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_patterns() {
        let mut config = crawler_config();
        config.ignored_urls = vec!["[".to_string()];
        assert!(matches!(
            validate_crawler_config(&config),
            Err(ConfigError::InvalidPattern(_))
        ));

        let mut config = crawler_config();
        config.ignored_words = vec!["(".to_string()];
        assert!(matches!(
            validate_crawler_config(&config),
            Err(ConfigError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_validate_start_pages() {
        assert!(validate_start_pages(&["http://example.com/".to_string()]).is_ok());

        assert!(validate_start_pages(&[]).is_err());
        assert!(matches!(
            validate_start_pages(&["not a url".to_string()]),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_start_pages(&["ftp://example.com/".to_string()]),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_output_config() {
        assert!(validate_output_config(&OutputConfig::default()).is_ok());

        let config = OutputConfig {
            result_path: Some(String::new()),
            profile_output_path: None,
        };
        assert!(validate_output_config(&config).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("a@b@example.com").is_err());
    }
}
