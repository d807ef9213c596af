//! Analyzers combine char filters, a tokenizer and token filters.
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Token Filters → Token Stream
//! ```
//!
//! - [`pipeline::PipelineAnalyzer`] - Custom char filter + tokenizer + filter chains
//! - [`review::ReviewNormalizer`] - The fixed review normalization pipeline

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod pipeline;
pub mod review;

pub use pipeline::PipelineAnalyzer;
pub use review::{ReviewNormalizer, StageOutput};
