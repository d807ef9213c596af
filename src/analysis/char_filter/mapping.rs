use aho_corasick::{AhoCorasick, MatchKind};

use super::CharFilter;
use crate::analysis::lexicon::ReplacementTable;
use crate::error::{Result, UlasanError};

/// Replaces substrings using a mapping, longest match first.
///
/// Used for the second emoji-to-words pass, where the keys are glyphs and
/// may appear anywhere inside a word.
pub struct MappingCharFilter {
    ac: AhoCorasick,
    replacements: Vec<String>,
    name: &'static str,
}

impl std::fmt::Debug for MappingCharFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingCharFilter")
            .field("name", &self.name)
            .field("entries", &self.replacements.len())
            .finish()
    }
}

impl MappingCharFilter {
    pub fn new(table: &ReplacementTable) -> Result<Self> {
        // Sort so pattern ids are stable between runs.
        let mut pairs: Vec<(&str, &str)> = table.iter().collect();
        pairs.sort_unstable();

        let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        let replacements = pairs.iter().map(|(_, v)| v.to_string()).collect();

        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&keys)
            .map_err(|e| UlasanError::analysis(format!("mapping matcher: {e}")))?;

        Ok(Self {
            ac,
            replacements,
            name: "mapping",
        })
    }

    /// Set the name reported by this filter.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl CharFilter for MappingCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut last_match_end = 0;

        for m in self.ac.find_iter(input) {
            output.push_str(&input[last_match_end..m.start()]);
            output.push_str(&self.replacements[m.pattern().as_usize()]);
            last_match_end = m.end();
        }

        output.push_str(&input[last_match_end..]);
        output
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
