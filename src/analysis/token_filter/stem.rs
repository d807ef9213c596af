//! Stemming token filter and stemmer implementations.

use std::sync::Arc;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;

    /// Stem every whitespace-separated word and rejoin with single spaces.
    fn stem_text(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| self.stem(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub mod indonesian;

pub use indonesian::IndonesianStemmer;

/// Filter that applies stemming to tokens.
#[derive(Clone)]
pub struct StemFilter {
    stemmer: Arc<dyn Stemmer>,
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl StemFilter {
    /// Create a new stem filter with the Indonesian stemmer and the built-in
    /// root dictionary.
    pub fn new() -> Self {
        StemFilter {
            stemmer: Arc::new(IndonesianStemmer::new()),
        }
    }

    /// Create a stem filter with a shared stemmer.
    pub fn with_stemmer(stemmer: Arc<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else {
                    let stemmed = self.stemmer.stem(&token.text);
                    token.with_text(stemmed)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_stem_filter() {
        let filter = StemFilter::new();
        let tokens = vec![
            Token::new("aplikasinya", 0),
            Token::new("membantu", 1),
            Token::new("dibantu", 2).stop(),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "aplikasi");
        assert_eq!(result[1].text, "bantu");
        assert_eq!(result[2].text, "dibantu"); // Stopped tokens are not processed
    }

    #[test]
    fn test_stem_text_matches_token_stemming() {
        let stemmer = IndonesianStemmer::new();
        assert_eq!(stemmer.stem_text("aplikasinya sangat membantu"), "aplikasi sangat bantu");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StemFilter::new().name(), "stem");
    }
}
