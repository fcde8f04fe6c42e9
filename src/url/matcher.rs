use crate::ConfigError;
use regex::Regex;

/// A compiled list of exclusion patterns
///
/// A candidate is excluded when it matches one of the patterns as a whole
/// string; a pattern that merely occurs somewhere inside the candidate does
/// not count. Patterns use the `regex` crate syntax.
///
/// # Examples
///
/// ```
/// use parcrawl::url::IgnoreRules;
///
/// let rules = IgnoreRules::compile([r".*\.pdf", r"https://ads\..*"]).unwrap();
///
/// assert!(rules.matches("https://example.com/report.pdf"));
/// assert!(rules.matches("https://ads.example.com/banner"));
/// assert!(!rules.matches("https://example.com/report.pdf?download=1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    patterns: Vec<Regex>,
}

impl IgnoreRules {
    /// Compiles every pattern, anchoring each one to the whole candidate
    ///
    /// # Returns
    ///
    /// * `Ok(IgnoreRules)` - All patterns compiled
    /// * `Err(ConfigError::InvalidPattern)` - The first pattern that failed
    pub fn compile<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(&format!("^(?:{})$", pattern))
                    .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", pattern, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if the candidate fully matches any pattern
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(candidate))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
