//! Word elongation correction.
//!
//! Informal reviews stretch words by repeating letters (`baguuus`,
//! `mantappp`). Any run of three or more identical letters inside a word is
//! treated as an elongation. Each elongated run may shrink to one or two
//! letters; the corrector tries those spellings against a lexicon, shortest
//! collapses first, and keeps the first known word. When no spelling is
//! known, every elongated run shrinks to a single letter.
//!
//! Runs of two letters are never touched, so words like `maaf` or `saat`
//! survive. With an [`EmojiCatalog`] attached, spelled-out emoji names at the
//! end of a word (`zzz` for 💤) are kept as they are.

use std::sync::Arc;

use super::CharFilter;
use crate::analysis::emoji::EmojiCatalog;
use crate::analysis::lexicon::Lexicon;

/// Minimum run length considered an elongation.
pub const MIN_ELONGATION: usize = 3;

/// Above this many elongated runs only the single-letter spelling is tried.
const MAX_SEARCHED_RUNS: usize = 6;

/// A run of identical characters inside a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    ch: char,
    len: usize,
}

fn runs(word: &str) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for ch in word.chars() {
        match runs.last_mut() {
            Some(run) if run.ch == ch => run.len += 1,
            _ => runs.push(Run { ch, len: 1 }),
        }
    }
    runs
}

fn is_elongated(run: &Run) -> bool {
    run.len >= MIN_ELONGATION && run.ch.is_alphabetic()
}

/// Spell the word with elongated run `i` shrunk to `1 + (mask >> i & 1)` letters.
fn spell(runs: &[Run], elongated: &[usize], mask: u32) -> String {
    let mut out = String::new();
    for (idx, run) in runs.iter().enumerate() {
        let len = match elongated.iter().position(|&e| e == idx) {
            Some(bit) => 1 + ((mask >> bit) & 1) as usize,
            None => run.len,
        };
        out.extend(std::iter::repeat_n(run.ch, len));
    }
    out
}

/// Corrects elongated words against a lexicon.
#[derive(Clone, Debug)]
pub struct ElongationCharFilter {
    lexicon: Arc<Lexicon>,
    catalog: Option<Arc<EmojiCatalog>>,
}

impl ElongationCharFilter {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        ElongationCharFilter {
            lexicon,
            catalog: None,
        }
    }

    /// Leave trailing spelled-out emoji names of `catalog` untouched.
    pub fn with_emoji_catalog(mut self, catalog: Arc<EmojiCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Correct the part of `word` before any trailing emoji names.
    fn correct_text_word(&self, word: &str) -> String {
        let split = self
            .catalog
            .as_ref()
            .map_or(word.len(), |catalog| catalog.name_suffix_start(word));
        let (head, names) = word.split_at(split);
        let mut corrected = self.correct_word(head);
        corrected.push_str(names);
        corrected
    }

    /// Correct a single word.
    pub fn correct_word(&self, word: &str) -> String {
        let runs = runs(word);
        let elongated: Vec<usize> = runs
            .iter()
            .enumerate()
            .filter(|(_, run)| is_elongated(run))
            .map(|(idx, _)| idx)
            .collect();

        if elongated.is_empty() {
            return word.to_string();
        }

        let fallback = spell(&runs, &elongated, 0);
        if elongated.len() > MAX_SEARCHED_RUNS {
            return fallback;
        }

        // Candidates ordered by how many runs keep a double letter.
        let mut masks: Vec<u32> = (0..(1u32 << elongated.len())).collect();
        masks.sort_by_key(|mask| (mask.count_ones(), *mask));

        masks
            .into_iter()
            .map(|mask| spell(&runs, &elongated, mask))
            .find(|candidate| self.lexicon.contains(candidate))
            .unwrap_or(fallback)
    }
}

impl CharFilter for ElongationCharFilter {
    fn filter(&self, input: &str) -> String {
        input
            .split_whitespace()
            .map(|word| self.correct_text_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn name(&self) -> &'static str {
        "elongation"
    }
}
