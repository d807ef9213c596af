//! Stop filter implementation.
//!
//! Removes common words that carry no sentiment signal. Each token is tested
//! on its own against the stopword lexicon, so filtering is word-level: a
//! token is dropped exactly when it is a stopword by itself.
//!
//! # Examples
//!
//! ```
//! use ulasan::analysis::token::Token;
//! use ulasan::analysis::token_filter::Filter;
//! use ulasan::analysis::token_filter::stop::StopFilter;
//!
//! let filter = StopFilter::new(); // built-in Indonesian stopwords
//! let tokens = vec![
//!     Token::new("aplikasi", 0),
//!     Token::new("yang", 1),
//!     Token::new("bagus", 2),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "aplikasi");
//! assert_eq!(result[1].text, "bagus");
//! ```

use std::sync::Arc;

use crate::analysis::lexicon::{DEFAULT_STOPWORDS, Lexicon};
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that removes stop words from the token stream.
///
/// Stopped tokens can either be removed (the default) or kept and marked as
/// stopped.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of stop words to remove
    stop_words: Arc<Lexicon>,
    /// Whether to remove stopped tokens entirely or just mark them as stopped
    remove_stopped: bool,
}

impl StopFilter {
    /// Create a new stop filter with the built-in Indonesian stop words.
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_STOPWORDS.clone())
    }

    /// Create a new stop filter with a shared stopword lexicon.
    pub fn with_stop_words(stop_words: Arc<Lexicon>) -> Self {
        StopFilter {
            stop_words,
            remove_stopped: true,
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_stop_words(Arc::new(Lexicon::from_words(words)))
    }

    /// Set whether to remove stopped tokens entirely or just mark them as stopped.
    pub fn remove_stopped(mut self, remove: bool) -> Self {
        self.remove_stopped = remove;
        self
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter_map(|token| {
                if token.is_stopped() {
                    Some(token)
                } else if self.is_stop_word(&token.text) {
                    if self.remove_stopped {
                        None
                    } else {
                        Some(token.stop())
                    }
                } else {
                    Some(token)
                }
            })
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::from_words(vec!["yang", "dan", "di"]);
        let tokens = vec![
            Token::new("aplikasi", 0),
            Token::new("yang", 1),
            Token::new("cepat", 2),
            Token::new("dan", 3),
            Token::new("ringan", 4),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "aplikasi");
        assert_eq!(result[1].text, "cepat");
        assert_eq!(result[2].text, "ringan");
    }

    #[test]
    fn test_stop_filter_preserve_stopped() {
        let filter = StopFilter::from_words(vec!["yang"]).remove_stopped(false);
        let tokens = vec![Token::new("aplikasi", 0), Token::new("yang", 1)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 2);
        assert!(!result[0].is_stopped());
        assert!(result[1].is_stopped());
    }

    #[test]
    fn test_word_level_matching() {
        // "diapakan" contains the stopword "di" but is not itself one.
        let filter = StopFilter::new();
        let tokens = vec![Token::new("diapakan", 0), Token::new("di", 1)];
        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "diapakan");
    }

    #[test]
    fn test_builtin_keeps_negation() {
        let filter = StopFilter::new();
        assert!(filter.is_stop_word("yang"));
        assert!(!filter.is_stop_word("tidak"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StopFilter::new().name(), "stop");
    }
}
