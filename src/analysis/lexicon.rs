//! Lexical resources shared by the review normalization stages.
//!
//! Four resources drive the word-level stages:
//!
//! - stopwords (dropped after tokenization)
//! - slang table (informal word → formal replacement)
//! - root words (stemmer dictionary, also the elongation lexicon)
//! - emoji words (second-pass glyph → word table)
//!
//! Built-in Indonesian defaults are compiled in. Each resource can be replaced
//! by a file: word lists hold one word per line, tables hold
//! `key<TAB>replacement` lines. Blank lines and `#` comments are ignored.
//!
//! Resources are built once and shared read-only through `Arc`.

use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use ahash::{AHashMap, AHashSet};
use log::{info, warn};

use crate::error::{Result, UlasanError};

/// Read a resource file, naming the path in the error.
fn read_resource(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| UlasanError::resource(format!("cannot read {}: {e}", path.display())))
}

const BUILTIN_STOPWORDS: &str = include_str!("../../resources/stopwords-id.txt");
const BUILTIN_SLANG: &str = include_str!("../../resources/slang-id.tsv");
const BUILTIN_ROOT_WORDS: &str = include_str!("../../resources/root-words-id.txt");
const BUILTIN_EMOJI_WORDS: &str = include_str!("../../resources/emoji-words-id.tsv");

/// Built-in Indonesian stopwords.
pub static DEFAULT_STOPWORDS: LazyLock<Arc<Lexicon>> =
    LazyLock::new(|| Arc::new(Lexicon::parse(BUILTIN_STOPWORDS)));

/// Built-in Indonesian root-word dictionary.
pub static DEFAULT_ROOT_WORDS: LazyLock<Arc<Lexicon>> =
    LazyLock::new(|| Arc::new(Lexicon::parse(BUILTIN_ROOT_WORDS)));

/// Built-in slang table.
pub static DEFAULT_SLANG: LazyLock<Arc<ReplacementTable>> =
    LazyLock::new(|| Arc::new(ReplacementTable::parse(BUILTIN_SLANG, "builtin slang")));

/// Built-in second-pass emoji word table.
pub static DEFAULT_EMOJI_WORDS: LazyLock<Arc<ReplacementTable>> = LazyLock::new(|| {
    Arc::new(ReplacementTable::parse(
        BUILTIN_EMOJI_WORDS,
        "builtin emoji words",
    ))
});

fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
}

/// A set of known words.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: AHashSet<String>,
}

impl Lexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lexicon from a list of words. Words are lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Lexicon { words }
    }

    /// Parse a one-word-per-line list.
    pub fn parse(text: &str) -> Self {
        Self::from_words(content_lines(text).map(|(_, line)| line))
    }

    /// Load a one-word-per-line list from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let lexicon = Self::parse(&read_resource(path)?);
        info!("Loaded {} words from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    /// Merge several lexicons into one.
    pub fn union<'a, I>(lexicons: I) -> Self
    where
        I: IntoIterator<Item = &'a Lexicon>,
    {
        let mut words = AHashSet::new();
        for lexicon in lexicons {
            words.extend(lexicon.words.iter().cloned());
        }
        Lexicon { words }
    }

    /// Check whether the word is known.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check whether the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// An exact-match replacement table (`key → replacement`).
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    entries: AHashMap<String, String>,
}

impl ReplacementTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from pairs. Later pairs override earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        ReplacementTable { entries }
    }

    /// Parse `key<TAB>replacement` lines. Lines without a tab are skipped
    /// with a warning.
    pub fn parse(text: &str, source: &str) -> Self {
        let mut entries = AHashMap::new();
        for (line_no, line) in content_lines(text) {
            match line.split_once('\t') {
                Some((key, value)) if !key.trim().is_empty() => {
                    entries.insert(key.trim().to_string(), value.trim().to_string());
                }
                _ => warn!("Skipping malformed line {line_no} in {source}: {line:?}"),
            }
        }
        ReplacementTable { entries }
    }

    /// Load a table from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_resource(path)?;
        let table = Self::parse(&content, &path.display().to_string());
        info!("Loaded {} entries from {}", table.len(), path.display());
        Ok(table)
    }

    /// Look up the replacement for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, replacement)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The keys as a lexicon.
    pub fn keys(&self) -> Lexicon {
        Lexicon::from_words(self.entries.keys())
    }

    /// All words appearing on the replacement side.
    pub fn replacement_words(&self) -> Lexicon {
        Lexicon::from_words(self.entries.values().flat_map(|v| v.split_whitespace()))
    }
}

/// Optional file overrides for the built-in resources.
#[derive(Debug, Clone, Default)]
pub struct ResourcePaths<'a> {
    pub stopwords: Option<&'a Path>,
    pub slang: Option<&'a Path>,
    pub root_words: Option<&'a Path>,
    pub emoji_words: Option<&'a Path>,
}

/// The full set of lexical resources used by the review normalizer.
#[derive(Debug, Clone)]
pub struct LexicalResources {
    pub stopwords: Arc<Lexicon>,
    pub slang: Arc<ReplacementTable>,
    pub root_words: Arc<Lexicon>,
    pub emoji_words: Arc<ReplacementTable>,
}

impl LexicalResources {
    /// The compiled-in Indonesian resources.
    pub fn builtin() -> Self {
        LexicalResources {
            stopwords: DEFAULT_STOPWORDS.clone(),
            slang: DEFAULT_SLANG.clone(),
            root_words: DEFAULT_ROOT_WORDS.clone(),
            emoji_words: DEFAULT_EMOJI_WORDS.clone(),
        }
    }

    /// Built-in resources with any given file overriding its counterpart.
    pub fn load(paths: &ResourcePaths<'_>) -> Result<Self> {
        let mut resources = Self::builtin();
        if let Some(path) = paths.stopwords {
            resources.stopwords = Arc::new(Lexicon::load(path)?);
        }
        if let Some(path) = paths.slang {
            resources.slang = Arc::new(ReplacementTable::load(path)?);
        }
        if let Some(path) = paths.root_words {
            resources.root_words = Arc::new(Lexicon::load(path)?);
        }
        if let Some(path) = paths.emoji_words {
            resources.emoji_words = Arc::new(ReplacementTable::load(path)?);
        }
        Ok(resources)
    }

    /// Words a later stage would remove or rewrite, so the stemmer must not
    /// produce them.
    pub fn unstable_words(&self) -> Lexicon {
        let slang_keys = self.slang.keys();
        Lexicon::union([self.stopwords.as_ref(), &slang_keys])
    }

    /// Words the elongation corrector accepts as correct spellings.
    pub fn spelling_lexicon(&self) -> Lexicon {
        let replacements = self.slang.replacement_words();
        Lexicon::union([
            self.root_words.as_ref(),
            self.stopwords.as_ref(),
            &replacements,
        ])
    }
}

impl Default for LexicalResources {
    fn default() -> Self {
        Self::builtin()
    }
}
