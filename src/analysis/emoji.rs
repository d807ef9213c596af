//! Emoji recognition.
//!
//! Two pieces live here:
//!
//! - a static set of Unicode ranges ([`EMOJI_RANGES`]) used to detect emoji
//!   glyphs when collapsing repeated runs;
//! - an [`EmojiCatalog`] built once from the `emojis` crate, mapping every
//!   emoji (skin tones and text-presentation forms included) to a spelled-out
//!   name token such as `smiling_face_with_heart_eyes`.
//!
//! Spelled-out names only contain lowercase letters and `_`, so they pass the
//! later URL, digit and punctuation stripping stages unchanged.

use aho_corasick::{AhoCorasick, MatchKind};
use ahash::AHashMap;

use crate::error::{Result, UlasanError};

/// Unicode ranges treated as emoji glyphs by the repeated-run detector.
pub const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F), // emoticons
    (0x1F300, 0x1F5FF), // symbols & pictographs
    (0x1F680, 0x1F6FF), // transport & map symbols
    (0x1F1E0, 0x1F1FF), // flags (regional indicators)
    (0x2702, 0x27B0),   // dingbats
    (0x24C2, 0x1F251),  // enclosed characters
];

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

/// Check whether a character falls into one of the emoji ranges.
pub fn is_emoji_glyph(c: char) -> bool {
    let code = c as u32;
    EMOJI_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&code))
}

/// Turn an emoji name into a single lowercase `[a-z_]`-style token.
///
/// Letters are kept (lowercased), everything else becomes `_`, runs of `_`
/// collapse and leading/trailing `_` are trimmed.
///
/// ```
/// use ulasan::analysis::emoji::canonical_name;
///
/// assert_eq!(canonical_name("smiling face with heart-eyes"), "smiling_face_with_heart_eyes");
/// assert_eq!(canonical_name("keycap: 1"), "keycap");
/// ```
pub fn canonical_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphabetic() {
            out.extend(c.to_lowercase());
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Catalog of emoji glyphs and their spelled-out names.
pub struct EmojiCatalog {
    /// Glyph matcher, leftmost-longest so ZWJ sequences win over their parts.
    glyphs: AhoCorasick,
    /// Spelled-out name for each glyph pattern.
    glyph_names: Vec<String>,
    /// Matcher over the distinct spelled-out names.
    names: AhoCorasick,
}

impl std::fmt::Debug for EmojiCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmojiCatalog")
            .field("glyphs", &self.glyph_names.len())
            .field("names", &self.names.patterns_len())
            .finish()
    }
}

impl EmojiCatalog {
    /// Build the catalog from the full `emojis` table.
    pub fn new() -> Result<Self> {
        let mut by_glyph: AHashMap<String, String> = AHashMap::new();

        for emoji in emojis::iter() {
            let mut variants = vec![emoji];
            if let Some(tones) = emoji.skin_tones() {
                variants.extend(tones);
            }
            for variant in variants {
                let name = canonical_name(variant.name());
                if name.is_empty() {
                    continue;
                }
                let glyph = variant.as_str();
                by_glyph.insert(glyph.to_string(), name.clone());

                let bare: String = glyph.chars().filter(|&c| c != VARIATION_SELECTOR_16).collect();
                if !bare.is_empty() && bare != glyph {
                    by_glyph.entry(bare).or_insert(name);
                }
            }
        }

        Self::from_pairs(by_glyph)
    }

    /// Build a catalog from explicit `(glyph, name)` pairs. Names are
    /// canonicalized.
    pub fn from_pairs<I, G, N>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (G, N)>,
        G: Into<String>,
        N: AsRef<str>,
    {
        let mut patterns = Vec::new();
        let mut glyph_names = Vec::new();
        for (glyph, name) in pairs {
            let name = canonical_name(name.as_ref());
            if name.is_empty() {
                continue;
            }
            patterns.push(glyph.into());
            glyph_names.push(name);
        }

        let mut distinct: Vec<&str> = glyph_names.iter().map(String::as_str).collect();
        distinct.sort_unstable();
        distinct.dedup();

        let glyphs = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| UlasanError::analysis(format!("emoji glyph matcher: {e}")))?;
        let names = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&distinct)
            .map_err(|e| UlasanError::analysis(format!("emoji name matcher: {e}")))?;

        Ok(EmojiCatalog {
            glyphs,
            glyph_names,
            names,
        })
    }

    /// Number of glyph forms known to the catalog.
    pub fn len(&self) -> usize {
        self.glyph_names.len()
    }

    /// Check whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.glyph_names.is_empty()
    }

    /// Spelled-out name of a glyph, if known.
    pub fn name_of(&self, glyph: &str) -> Option<&str> {
        self.glyphs
            .find_iter(glyph)
            .next()
            .filter(|m| m.start() == 0 && m.end() == glyph.len())
            .map(|m| self.glyph_names[m.pattern().as_usize()].as_str())
    }

    /// Replace every known glyph with its spelled-out name, no delimiters.
    pub fn spell_out(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        for m in self.glyphs.find_iter(text) {
            output.push_str(&text[last..m.start()]);
            output.push_str(&self.glyph_names[m.pattern().as_usize()]);
            last = m.end();
        }
        output.push_str(&text[last..]);
        output
    }

    /// Byte offset where the trailing run of spelled-out names in `word`
    /// starts, or `word.len()` when the word does not end in a name.
    ///
    /// Names are glued to the preceding word by spell-out, so `tidurzzz`
    /// splits at 5 and `zzz` at 0.
    pub fn name_suffix_start(&self, word: &str) -> usize {
        let mut chain_start = word.len();
        let mut chain_end = None;
        for m in self.names.find_iter(word) {
            if chain_end != Some(m.start()) {
                chain_start = m.start();
            }
            chain_end = Some(m.end());
        }
        if chain_end == Some(word.len()) {
            chain_start
        } else {
            word.len()
        }
    }

    /// Collapse back-to-back repetitions of the same spelled-out name.
    ///
    /// Only chains of names that end a word are touched, since spell-out
    /// glues names onto the end of the preceding word. A short name inside
    /// an ordinary word (`hotdogdogs`) is left alone.
    pub fn collapse_name_runs(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        let mut chain: Vec<(usize, usize, usize)> = Vec::new(); // (pattern, start, end)

        for m in self.names.find_iter(text) {
            if chain.last().is_some_and(|&(_, _, end)| end != m.start()) {
                collapse_chain(text, &mut chain, &mut output, &mut last);
            }
            chain.push((m.pattern().as_usize(), m.start(), m.end()));
        }
        collapse_chain(text, &mut chain, &mut output, &mut last);

        output.push_str(&text[last..]);
        output
    }
}

/// Drop repeated names from a finished chain of adjacent name matches if the
/// chain ends a word, then clear it.
fn collapse_chain(
    text: &str,
    chain: &mut Vec<(usize, usize, usize)>,
    output: &mut String,
    last: &mut usize,
) {
    let Some(&(_, _, chain_end)) = chain.last() else {
        return;
    };
    let ends_word = text[chain_end..].chars().next().is_none_or(char::is_whitespace);
    if ends_word {
        for pair in chain.windows(2) {
            let (prev_pattern, _, _) = pair[0];
            let (pattern, start, end) = pair[1];
            if pattern == prev_pattern {
                output.push_str(&text[*last..start]);
                *last = end;
            }
        }
    }
    chain.clear();
}

/// Collapse runs of two or more identical emoji glyphs to a single glyph.
///
/// Only characters inside [`EMOJI_RANGES`] are affected. Isolated glyphs and
/// runs of different glyphs are left alone.
pub fn collapse_glyph_runs(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    for c in text.chars() {
        if previous == Some(c) && is_emoji_glyph(c) {
            continue;
        }
        output.push(c);
        previous = Some(c);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> EmojiCatalog {
        EmojiCatalog::from_pairs([
            ("🔥", "fire"),
            ("😍", "smiling face with heart-eyes"),
            ("👍", "thumbs up"),
            ("👍🏽", "thumbs up: medium skin tone"),
        ])
        .unwrap()
    }

    #[test]
    fn test_is_emoji_glyph() {
        assert!(is_emoji_glyph('😍'));
        assert!(is_emoji_glyph('🚀'));
        assert!(is_emoji_glyph('✂'));
        assert!(!is_emoji_glyph('a'));
        assert!(!is_emoji_glyph('!'));
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("thumbs up: medium skin tone"), "thumbs_up_medium_skin_tone");
        assert_eq!(canonical_name("Flag: Indonesia"), "flag_indonesia");
        assert_eq!(canonical_name("#"), "");
    }

    #[test]
    fn test_spell_out_without_delimiters() {
        let catalog = small_catalog();
        assert_eq!(catalog.spell_out("mantap🔥"), "mantapfire");
        assert_eq!(catalog.spell_out("ok 😍 sip"), "ok smiling_face_with_heart_eyes sip");
    }

    #[test]
    fn test_spell_out_prefers_longest_sequence() {
        let catalog = small_catalog();
        assert_eq!(catalog.spell_out("👍🏽"), "thumbs_up_medium_skin_tone");
        assert_eq!(catalog.name_of("👍"), Some("thumbs_up"));
        assert_eq!(catalog.name_of("x"), None);
    }

    #[test]
    fn test_collapse_name_runs() {
        let catalog = small_catalog();
        assert_eq!(catalog.collapse_name_runs("bangetfirefirefire"), "bangetfire");
        assert_eq!(catalog.collapse_name_runs("fire bagus fire"), "fire bagus fire");
        assert_eq!(
            catalog.collapse_name_runs("firefirethumbs_upthumbs_up firefire"),
            "firethumbs_up fire"
        );
    }

    #[test]
    fn test_collapse_name_runs_only_at_word_end() {
        let catalog = EmojiCatalog::from_pairs([("🐶", "dog"), ("🐜", "ant")]).unwrap();
        assert_eq!(catalog.collapse_name_runs("hotdogdogs"), "hotdogdogs");
        assert_eq!(catalog.collapse_name_runs("antantara"), "antantara");
        assert_eq!(catalog.collapse_name_runs("dogdog"), "dog");
        assert_eq!(catalog.collapse_name_runs("bagus dogdogdog mantap"), "bagus dog mantap");
    }

    #[test]
    fn test_name_suffix_start() {
        let catalog = EmojiCatalog::from_pairs([("💤", "zzz"), ("🔥", "fire")]).unwrap();
        assert_eq!(catalog.name_suffix_start("zzz"), 0);
        assert_eq!(catalog.name_suffix_start("zzzzzz"), 0);
        assert_eq!(catalog.name_suffix_start("tidurzzz"), 5);
        assert_eq!(catalog.name_suffix_start("mantapfirezzz"), 6);
        assert_eq!(catalog.name_suffix_start("firemen"), 7);
        assert_eq!(catalog.name_suffix_start(""), 0);
    }

    #[test]
    fn test_collapse_glyph_runs() {
        assert_eq!(collapse_glyph_runs("😍😍😍"), "😍");
        assert_eq!(collapse_glyph_runs("😍🔥😍"), "😍🔥😍");
        assert_eq!(collapse_glyph_runs("🔥🔥 a 🔥🔥🔥"), "🔥 a 🔥");
        assert_eq!(collapse_glyph_runs("aaa"), "aaa");
    }

    #[test]
    fn test_full_catalog_knows_common_emoji() {
        let catalog = EmojiCatalog::new().unwrap();
        assert!(!catalog.is_empty());
        let fire = catalog.name_of("🔥").unwrap();
        assert!(fire.contains("fire"));
        assert!(fire.chars().all(|c| c.is_alphabetic() || c == '_'));
    }
}
