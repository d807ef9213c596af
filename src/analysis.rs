//! Text analysis module for ulasan.
//!
//! Raw reviews flow through char filters (text to text), a tokenizer and token
//! filters. [`analyzer::ReviewNormalizer`] assembles the fixed review
//! normalization chain out of these parts.

pub mod analyzer;
pub mod char_filter;
pub mod emoji;
pub mod lexicon;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
