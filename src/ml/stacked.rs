//! Two-stage stacked inference.
//!
//! The base model sees the projected text features. The meta ("hybrid")
//! model sees only the base model's probability pair, as a two-column row.

use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::error::{Result, UlasanError};
use crate::ml::classifier::{ClassProbabilities, Classifier, Prediction};

/// The row handed from the base model to the meta model.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaFeatures(Vec<f64>);

impl MetaFeatures {
    /// Width of every meta row.
    pub const WIDTH: usize = 2;

    pub fn from_probabilities(probabilities: &ClassProbabilities) -> Self {
        MetaFeatures(probabilities.to_vec())
    }

    pub fn as_row(&self) -> &[f64] {
        &self.0
    }
}

/// Both stages' verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StackedPrediction {
    pub base: Prediction,
    pub meta: Prediction,
}

/// A base classifier feeding a meta classifier.
#[derive(Debug, Clone)]
pub struct StackedClassifier {
    base: Arc<dyn Classifier>,
    meta: Arc<dyn Classifier>,
}

impl StackedClassifier {
    /// Pair two models; the meta model must take a two-column row.
    pub fn new(base: Arc<dyn Classifier>, meta: Arc<dyn Classifier>) -> Result<Self> {
        if meta.input_width() != MetaFeatures::WIDTH {
            return Err(UlasanError::model(format!(
                "meta model {} expects {} features, stacking provides {}",
                meta.name(),
                meta.input_width(),
                MetaFeatures::WIDTH
            )));
        }
        Ok(StackedClassifier { base, meta })
    }

    /// Run the base model on `features`, then the meta model on its output.
    pub fn predict(&self, features: &[f64]) -> Result<StackedPrediction> {
        let base = self.base.classify(features)?;
        let meta_features = MetaFeatures::from_probabilities(&base.probabilities);
        let meta = self.meta.classify(meta_features.as_row())?;
        debug!(
            "base {} -> {:?}, meta {} -> {:?}",
            self.base.name(),
            base.raw_label,
            self.meta.name(),
            meta.raw_label
        );
        Ok(StackedPrediction { base, meta })
    }

    pub fn base(&self) -> &Arc<dyn Classifier> {
        &self.base
    }

    pub fn meta(&self) -> &Arc<dyn Classifier> {
        &self.meta
    }
}
