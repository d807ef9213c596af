use regex::Regex;

use super::CharFilter;
use crate::error::Result;

/// URL-like runs: `http…`, `https…` or `www…` followed by non-whitespace.
pub const URL_PATTERN: &str = r"http\S+|www\S+|https\S+";
/// Decimal digit runs (Unicode `Nd`).
pub const DIGIT_PATTERN: &str = r"\d+";
/// Any character that is neither a word character nor whitespace.
pub const PUNCTUATION_PATTERN: &str = r"[^\w\s]";

/// A char filter that replaces characters matching a regex pattern.
#[derive(Debug, Clone)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
    name: &'static str,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
            name: "pattern_replace",
        })
    }

    /// Set the name reported by this filter.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Removes URLs.
    pub fn urls() -> Result<Self> {
        Ok(Self::new(URL_PATTERN, "")?.with_name("url_strip"))
    }

    /// Removes digits.
    pub fn digits() -> Result<Self> {
        Ok(Self::new(DIGIT_PATTERN, "")?.with_name("digit_strip"))
    }

    /// Replaces each punctuation or symbol character with a space.
    pub fn punctuation() -> Result<Self> {
        Ok(Self::new(PUNCTUATION_PATTERN, " ")?.with_name("punctuation_strip"))
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
