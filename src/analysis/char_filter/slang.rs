//! Slang normalization char filter.
//!
//! Replaces informal words with their formal form using a
//! [`ReplacementTable`]. Matching is exact and word-level: `gk` is replaced,
//! `gkx` is not. Word order is preserved and a replacement may span several
//! words (`makasih` → `terima kasih`).

use std::sync::Arc;

use super::CharFilter;
use crate::analysis::lexicon::ReplacementTable;

/// Word-level slang replacement.
#[derive(Clone, Debug)]
pub struct SlangCharFilter {
    table: Arc<ReplacementTable>,
}

impl SlangCharFilter {
    pub fn new(table: Arc<ReplacementTable>) -> Self {
        SlangCharFilter { table }
    }
}

impl CharFilter for SlangCharFilter {
    fn filter(&self, input: &str) -> String {
        input
            .split_whitespace()
            .map(|word| self.table.get(word).unwrap_or(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn name(&self) -> &'static str {
        "slang"
    }
}
