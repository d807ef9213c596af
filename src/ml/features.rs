//! Feature rows, feature selection and the text-to-row projector.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UlasanError};
use crate::ml::tfidf::TfIdfVectorizer;

/// A dense feature vector for one input text.
pub type FeatureRow = Vec<f64>;

/// One entry of a selected-features artifact.
///
/// Either a 0-based column index, or a column name of the form
/// `feature_N` where `N` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum FeatureRef {
    Index(usize),
    Name(String),
}

impl FeatureRef {
    fn to_index(&self) -> Result<usize> {
        match self {
            FeatureRef::Index(idx) => Ok(*idx),
            FeatureRef::Name(name) => name
                .rsplit_once('_')
                .and_then(|(_, number)| number.parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(|| UlasanError::feature(format!("invalid feature name {name:?}"))),
        }
    }
}

/// A fixed list of columns picked from every row, in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSelector {
    indices: Vec<usize>,
}

impl FeatureSelector {
    pub fn new(indices: Vec<usize>) -> Self {
        FeatureSelector { indices }
    }

    /// Parse a JSON array of column indices or `feature_N` names.
    pub fn from_json(json: &str) -> Result<Self> {
        let refs: Vec<FeatureRef> = serde_json::from_str(json)?;
        let indices = refs
            .iter()
            .map(FeatureRef::to_index)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(indices))
    }

    /// Load a selected-features artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            UlasanError::feature(format!("cannot read feature list {}: {e}", path.display()))
        })?;
        let selector = Self::from_json(&content)?;
        info!(
            "Loaded {} selected features from {}",
            selector.len(),
            path.display()
        );
        Ok(selector)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Fail if any index falls outside a row of `width` columns.
    pub fn validate(&self, width: usize) -> Result<()> {
        match self.indices.iter().find(|&&idx| idx >= width) {
            Some(idx) => Err(UlasanError::feature(format!(
                "selected feature {idx} is outside a row of {width} features"
            ))),
            None => Ok(()),
        }
    }

    /// Pick the selected columns from `row`.
    pub fn select(&self, row: &[f64]) -> Result<FeatureRow> {
        self.indices
            .iter()
            .map(|&idx| {
                row.get(idx).copied().ok_or_else(|| {
                    UlasanError::feature(format!(
                        "selected feature {idx} is outside a row of {} features",
                        row.len()
                    ))
                })
            })
            .collect()
    }
}

/// Vectorizer plus column selection: normalized text in, model row out.
#[derive(Debug, Clone)]
pub struct FeatureProjector {
    vectorizer: TfIdfVectorizer,
    selector: FeatureSelector,
}

impl FeatureProjector {
    /// Pair a vectorizer with a selector whose indices fit its rows.
    pub fn new(vectorizer: TfIdfVectorizer, selector: FeatureSelector) -> Result<Self> {
        selector.validate(vectorizer.vocabulary_size())?;
        Ok(FeatureProjector {
            vectorizer,
            selector,
        })
    }

    /// Project one normalized text.
    pub fn project(&self, text: &str) -> Result<FeatureRow> {
        self.selector.select(&self.vectorizer.transform(text))
    }

    /// Project several normalized texts, one row each.
    pub fn transform(&self, texts: &[&str]) -> Result<Vec<FeatureRow>> {
        texts.iter().map(|text| self.project(text)).collect()
    }

    /// Width of the projected rows.
    pub fn output_width(&self) -> usize {
        self.selector.len()
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub fn selector(&self) -> &FeatureSelector {
        &self.selector
    }
}
