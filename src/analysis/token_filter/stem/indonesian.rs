//! Dictionary-based Indonesian stemmer.
//!
//! Affix stripping in the Nazief–Adriani family. A word is only ever reduced
//! to an entry of the root dictionary; when no affix combination yields a
//! root the word is returned unchanged. That makes stemming idempotent.
//!
//! Suffixes are removed first, outermost layer first:
//!
//! 1. particles: `-lah -kah -tah -pun`
//! 2. possessives: `-nya -ku -mu`
//! 3. derivational: `-kan -an -i`
//!
//! For every suffix layer (most stripped first) up to three derivational
//! prefixes are removed: `di- ke- se-`, `ber-/be-/bel-`, `ter-/te-`,
//! `per-/pe-/pel-` and the nasal `me-`/`pe-` forms with their recoding
//! (`meny-` → `s`, `men-` → `t`, `mem-` → `p`, `meng-` → `k`).

use std::sync::Arc;

use super::Stemmer;
use crate::analysis::lexicon::{DEFAULT_ROOT_WORDS, Lexicon};

const PARTICLES: &[&str] = &["lah", "kah", "tah", "pun"];
const POSSESSIVES: &[&str] = &["nya", "ku", "mu"];
const DERIVATIONAL_SUFFIXES: &[&str] = &["kan", "an", "i"];

const MAX_PREFIXES: usize = 3;
const MIN_STEM_CHARS: usize = 2;

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Remove `affix` from the end of `word` if enough of the word remains.
fn strip_suffix<'a>(word: &'a str, affix: &str) -> Option<&'a str> {
    word.strip_suffix(affix)
        .filter(|rest| char_len(rest) >= MIN_STEM_CHARS)
}

fn strip_prefix<'a>(word: &'a str, affix: &str) -> Option<&'a str> {
    word.strip_prefix(affix)
        .filter(|rest| char_len(rest) >= MIN_STEM_CHARS)
}

/// Words left after removing one derivational prefix, in trial order.
fn prefix_candidates(word: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut push = |s: String| {
        if char_len(&s) >= MIN_STEM_CHARS && !out.contains(&s) {
            out.push(s);
        }
    };

    for plain in ["di", "ke", "se", "ter", "te", "ber", "bel", "be", "per", "pel"] {
        if let Some(rest) = strip_prefix(word, plain) {
            push(rest.to_string());
        }
    }

    for nasal in ["me", "pe"] {
        let Some(after) = word.strip_prefix(nasal) else {
            continue;
        };
        let first = after.chars().next();

        if let Some(rest) = after.strip_prefix("ng") {
            match rest.chars().next() {
                Some(c) if is_vowel(c) => {
                    push(format!("k{rest}"));
                    push(rest.to_string());
                }
                Some(_) => push(rest.to_string()),
                None => {}
            }
        } else if let Some(rest) = after.strip_prefix("ny") {
            push(format!("s{rest}"));
        } else if let Some(rest) = after.strip_prefix('m') {
            match rest.chars().next() {
                Some(c) if is_vowel(c) => {
                    push(format!("p{rest}"));
                    push(format!("m{rest}"));
                }
                Some(_) => push(rest.to_string()),
                None => {}
            }
        } else if let Some(rest) = after.strip_prefix('n') {
            match rest.chars().next() {
                Some(c) if is_vowel(c) => {
                    push(format!("t{rest}"));
                    push(format!("n{rest}"));
                }
                Some(_) => push(rest.to_string()),
                None => {}
            }
        } else if matches!(first, Some('l' | 'r' | 'w' | 'y')) {
            push(after.to_string());
        } else if nasal == "pe" {
            push(after.to_string());
        }
    }

    out
}

/// Dictionary-based Indonesian stemmer.
#[derive(Debug, Clone)]
pub struct IndonesianStemmer {
    roots: Arc<Lexicon>,
    /// Roots never produced by stripping, e.g. stopwords.
    excluded: Option<Arc<Lexicon>>,
}

impl IndonesianStemmer {
    /// Create a stemmer over the built-in root dictionary.
    pub fn new() -> Self {
        Self::with_roots(DEFAULT_ROOT_WORDS.clone())
    }

    /// Create a stemmer over a shared root dictionary.
    pub fn with_roots(roots: Arc<Lexicon>) -> Self {
        IndonesianStemmer {
            roots,
            excluded: None,
        }
    }

    /// Never strip a word down to one of `excluded`; such words are left
    /// whole instead.
    ///
    /// Stopwords and slang keys go here when the stemmer runs after the
    /// stopword filter, so normalized text stays fixed when normalized again.
    pub fn excluding(mut self, excluded: Arc<Lexicon>) -> Self {
        self.excluded = Some(excluded);
        self
    }

    /// Size of the root dictionary.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    fn is_root(&self, word: &str) -> bool {
        self.roots.contains(word)
    }

    /// A stripped candidate is accepted if it is a root and not excluded.
    fn accepts(&self, candidate: &str) -> bool {
        self.is_root(candidate)
            && !self
                .excluded
                .as_ref()
                .is_some_and(|excluded| excluded.contains(candidate))
    }

    /// The word after each suffix layer, least stripped first.
    fn suffix_layers(word: &str) -> Vec<String> {
        let mut layers = vec![word.to_string()];
        let mut current = word;

        if let Some(rest) = PARTICLES.iter().find_map(|p| strip_suffix(current, p)) {
            layers.push(rest.to_string());
            current = rest;
        }
        if let Some(rest) = POSSESSIVES.iter().find_map(|p| strip_suffix(current, p)) {
            layers.push(rest.to_string());
            current = rest;
        }
        // "-kan" and "-an" both match words like "masukan"; keep both readings.
        for suffix in DERIVATIONAL_SUFFIXES {
            if let Some(rest) = strip_suffix(current, suffix) {
                layers.push(rest.to_string());
            }
        }
        layers
    }

    fn strip_prefixes(&self, word: &str, depth: usize) -> Option<String> {
        if depth == 0 {
            return None;
        }
        for candidate in prefix_candidates(word) {
            if self.accepts(&candidate) {
                return Some(candidate);
            }
            if let Some(root) = self.strip_prefixes(&candidate, depth - 1) {
                return Some(root);
            }
        }
        None
    }
}

impl Default for IndonesianStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for IndonesianStemmer {
    fn stem(&self, word: &str) -> String {
        if char_len(word) <= 3 || self.is_root(word) || !word.chars().all(char::is_alphabetic) {
            return word.to_string();
        }

        for layer in Self::suffix_layers(word).iter().rev() {
            if self.accepts(layer) {
                return layer.clone();
            }
            if let Some(root) = self.strip_prefixes(layer, MAX_PREFIXES) {
                return root;
            }
        }

        word.to_string()
    }

    fn name(&self) -> &'static str {
        "indonesian"
    }
}
