//! The classifier contract shared by the base and meta models.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, UlasanError};

/// Raw labels used when a model does not name its classes.
pub const DEFAULT_CLASSES: [i64; 2] = [-1, 1];

pub(crate) fn default_classes() -> [i64; 2] {
    DEFAULT_CLASSES
}

/// Probability of each class, negative first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub negative: f64,
    pub positive: f64,
}

impl ClassProbabilities {
    pub fn new(negative: f64, positive: f64) -> Self {
        ClassProbabilities { negative, positive }
    }

    /// Build from a two-element slice `[P(negative), P(positive)]`.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [negative, positive] => Ok(Self::new(*negative, *positive)),
            _ => Err(UlasanError::model(format!(
                "expected 2 class probabilities, got {}",
                values.len()
            ))),
        }
    }

    /// Index of the more probable class; the first class wins ties.
    pub fn argmax(&self) -> usize {
        if self.positive > self.negative { 1 } else { 0 }
    }

    /// The pair as a feature row.
    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.negative, self.positive]
    }
}

/// Sentiment derived from a raw model label.
///
/// Any raw value other than -1 and +1 maps to `Unknown`; that is never an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentLabel {
    Negative,
    Positive,
    Unknown(i64),
}

impl SentimentLabel {
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            -1 => SentimentLabel::Negative,
            1 => SentimentLabel::Positive,
            other => SentimentLabel::Unknown(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SentimentLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One model's verdict on one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub raw_label: i64,
    pub label: SentimentLabel,
    pub probabilities: ClassProbabilities,
}

impl Prediction {
    /// Pick the raw label for `probabilities` from a model's class list.
    pub fn from_probabilities(probabilities: ClassProbabilities, classes: [i64; 2]) -> Self {
        let raw_label = classes[probabilities.argmax()];
        Prediction {
            raw_label,
            label: SentimentLabel::from_raw(raw_label),
            probabilities,
        }
    }
}

/// A trained binary classifier.
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Class probabilities for one feature row.
    fn predict_proba(&self, row: &[f64]) -> Result<ClassProbabilities>;

    /// Raw labels, in probability order.
    fn classes(&self) -> [i64; 2];

    /// Number of features the model expects.
    fn input_width(&self) -> usize;

    /// Short name of the model kind.
    fn name(&self) -> &'static str;

    /// Raw label for one feature row.
    fn predict(&self, row: &[f64]) -> Result<i64> {
        Ok(self.classify(row)?.raw_label)
    }

    /// Label and probabilities for one feature row.
    fn classify(&self, row: &[f64]) -> Result<Prediction> {
        let probabilities = self.predict_proba(row)?;
        Ok(Prediction::from_probabilities(probabilities, self.classes()))
    }
}

/// Fail unless `row` has exactly `expected` features.
pub(crate) fn check_width(model: &str, expected: usize, row: &[f64]) -> Result<()> {
    if row.len() != expected {
        return Err(UlasanError::model(format!(
            "{model} expects {expected} features, got {}",
            row.len()
        )));
    }
    Ok(())
}
