//! Char filter implementations for text normalization.
//!
//! Char filters rewrite the whole review string before it is tokenized. The
//! review normalizer chains them in a fixed order; each one sees the previous
//! one's output.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Unicode case folding
//! - [`emoji::EmojiSpellOutCharFilter`] - Emoji glyphs to name tokens
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement (URLs, digits, punctuation)
//! - [`whitespace::WhitespaceCollapseCharFilter`] - Whitespace collapsing and trimming
//! - [`slang::SlangCharFilter`] - Word-level slang replacement
//! - [`elongation::ElongationCharFilter`] - Repeated-letter correction
//! - [`mapping::MappingCharFilter`] - Substring mapping replacement
//! - [`emoji::RepeatedEmojiCharFilter`] - Repeated emoji collapsing
//!
//! # Examples
//!
//! ```
//! use ulasan::analysis::char_filter::CharFilter;
//! use ulasan::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::digits().unwrap();
//! assert_eq!(filter.filter("versi 2024"), "versi ");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod elongation;
pub mod emoji;
pub mod lowercase;
pub mod mapping;
pub mod pattern_replace;
pub mod slang;
pub mod whitespace;
