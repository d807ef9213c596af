//! Token filter implementations for token transformation.
//!
//! Filters receive the token stream produced by the tokenizer and return a
//! new stream:
//!
//! ```text
//! Tokenizer → Stop Words → Stemmer → Rejoin
//! ```
//!
//! # Examples
//!
//! ```
//! use ulasan::analysis::token::Token;
//! use ulasan::analysis::token_filter::Filter;
//! use ulasan::analysis::token_filter::stop::StopFilter;
//!
//! let filter = StopFilter::from_words(vec!["yang"]);
//! let tokens = vec![Token::new("aplikasi", 0), Token::new("yang", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text, "aplikasi");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` so filters can be held in shared,
/// read-only pipelines.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod stem;
pub mod stop;

pub use stem::{IndonesianStemmer, StemFilter, Stemmer};
pub use stop::StopFilter;
