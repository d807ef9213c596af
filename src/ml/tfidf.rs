//! TF-IDF vectorizer for text feature extraction.
//!
//! Tokens are maximal runs of word characters at least two long, the same
//! split as the `(?u)\b\w\w+\b` pattern common artifact exporters use. Word
//! n-grams join tokens with a single space.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UlasanError};
use crate::ml::features::FeatureRow;

/// Row normalization applied after idf weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    #[default]
    L2,
    None,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// TF-IDF vectorizer for text feature extraction.
#[derive(Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> column mapping.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each column.
    idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default)]
    norm: Norm,
    #[serde(default = "default_true")]
    lowercase: bool,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("ngram_range", &self.ngram_range)
            .field("sublinear_tf", &self.sublinear_tf)
            .field("norm", &self.norm)
            .finish()
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer over unigrams with l2 normalization.
    pub fn new() -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            ngram_range: default_ngram_range(),
            sublinear_tf: false,
            norm: Norm::L2,
            lowercase: true,
        }
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    /// Load a fitted vectorizer from a JSON artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            UlasanError::feature(format!("cannot read vectorizer {}: {e}", path.display()))
        })?;
        let vectorizer = Self::from_json(&content).map_err(|e| {
            UlasanError::feature(format!("invalid vectorizer {}: {e}", path.display()))
        })?;
        info!(
            "Loaded vectorizer from {} ({} terms)",
            path.display(),
            vectorizer.vocabulary_size()
        );
        Ok(vectorizer)
    }

    /// Parse and validate a vectorizer artifact.
    pub fn from_json(json: &str) -> Result<Self> {
        let vectorizer: Self = serde_json::from_str(json)?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Write the vectorizer as a JSON artifact.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(UlasanError::feature(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err(UlasanError::feature(format!(
                "idf has {} entries for a vocabulary of {}",
                self.idf.len(),
                self.vocabulary.len()
            )));
        }
        let mut seen = vec![false; self.vocabulary.len()];
        for (term, &idx) in &self.vocabulary {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(UlasanError::feature(format!(
                        "term {term:?} has invalid or duplicate column {idx}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Fit the vectorizer on training documents.
    ///
    /// Columns are assigned in sorted term order and the idf is smoothed:
    /// `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit(&mut self, documents: &[&str]) -> Result<()> {
        if documents.is_empty() {
            return Err(UlasanError::feature("cannot fit on zero documents"));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(UlasanError::feature(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let unique_terms: HashSet<String> = self.terms(doc).into_iter().collect();
            for term in unique_terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<&String> = document_frequency.keys().collect();
        terms.sort();

        let n_documents = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (idx, term) in terms.into_iter().enumerate() {
            let df = document_frequency[term] as f64;
            idf.push(((1.0 + n_documents) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term.clone(), idx);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;

        Ok(())
    }

    /// Transform a document into a TF-IDF feature row.
    pub fn transform(&self, document: &str) -> FeatureRow {
        let mut row: FeatureRow = vec![0.0; self.vocabulary.len()];

        for term in self.terms(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                row[idx] += 1.0;
            }
        }

        for (idx, value) in row.iter_mut().enumerate() {
            if *value > 0.0 {
                let tf = if self.sublinear_tf { 1.0 + value.ln() } else { *value };
                *value = tf * self.idf[idx];
            }
        }

        let norm = match self.norm {
            Norm::L1 => row.iter().map(|v| v.abs()).sum::<f64>(),
            Norm::L2 => row.iter().map(|v| v * v).sum::<f64>().sqrt(),
            Norm::None => 0.0,
        };
        if norm > 0.0 {
            for value in &mut row {
                *value /= norm;
            }
        }

        row
    }

    /// Transform several documents, one row each.
    pub fn transform_batch(&self, documents: &[&str]) -> Vec<FeatureRow> {
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Word tokens of a document.
    fn tokens(&self, document: &str) -> Vec<String> {
        document
            .split(|c: char| !is_word_char(c))
            .filter(|word| word.chars().count() >= 2)
            .map(|word| {
                if self.lowercase {
                    word.to_lowercase()
                } else {
                    word.to_string()
                }
            })
            .collect()
    }

    /// Word n-grams of a document, for every n in the configured range.
    fn terms(&self, document: &str) -> Vec<String> {
        let tokens = self.tokens(document);
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn ngram_range(&self) -> (usize, usize) {
        self.ngram_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitted() -> TfIdfVectorizer {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer
            .fit(&["aplikasi bagus", "aplikasi jelek", "bagus sekali"])
            .unwrap();
        vectorizer
    }

    #[test]
    fn test_fit_sorted_vocabulary() {
        let vectorizer = fitted();
        assert_eq!(vectorizer.vocabulary_size(), 4);
        assert_eq!(vectorizer.term_index("aplikasi"), Some(0));
        assert_eq!(vectorizer.term_index("bagus"), Some(1));
        assert_eq!(vectorizer.term_index("jelek"), Some(2));
        assert_eq!(vectorizer.term_index("sekali"), Some(3));
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let vectorizer = fitted();
        let row = vectorizer.transform("aplikasi bagus bagus");
        let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert!(row[1] > row[0]);
        assert_eq!(row[2], 0.0);
    }

    #[test]
    fn test_unknown_and_short_tokens_ignored() {
        let vectorizer = fitted();
        let row = vectorizer.transform("x y tidak");
        assert!(row.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_ngrams() {
        let mut vectorizer = TfIdfVectorizer::new().with_ngram_range(1, 2);
        vectorizer.fit(&["tidak bagus", "bagus"]).unwrap();
        assert!(vectorizer.term_index("tidak bagus").is_some());
        assert_eq!(vectorizer.vocabulary_size(), 3);
    }

    #[test]
    fn test_sublinear_tf() {
        let mut vectorizer = TfIdfVectorizer::new()
            .with_sublinear_tf(true)
            .with_norm(Norm::None);
        vectorizer.fit(&["bagus"]).unwrap();
        let row = vectorizer.transform("bagus bagus bagus");
        // idf of a term in every document is 1.
        assert!((row[0] - (1.0 + 3f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn test_artifact_validation() {
        let ok = r#"{"vocabulary": {"bagus": 0, "jelek": 1}, "idf": [1.0, 1.5]}"#;
        let vectorizer = TfIdfVectorizer::from_json(ok).unwrap();
        assert_eq!(vectorizer.ngram_range(), (1, 1));

        let short_idf = r#"{"vocabulary": {"bagus": 0, "jelek": 1}, "idf": [1.0]}"#;
        assert!(TfIdfVectorizer::from_json(short_idf).is_err());

        let bad_column = r#"{"vocabulary": {"bagus": 0, "jelek": 5}, "idf": [1.0, 1.0]}"#;
        assert!(TfIdfVectorizer::from_json(bad_column).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tfidf.json");
        let vectorizer = fitted();
        vectorizer.save(&path).unwrap();

        let loaded = TfIdfVectorizer::load(&path).unwrap();
        assert_eq!(loaded.transform("aplikasi bagus"), vectorizer.transform("aplikasi bagus"));
    }

    #[test]
    fn test_fit_empty_is_error() {
        assert!(TfIdfVectorizer::new().fit(&[]).is_err());
    }
}
