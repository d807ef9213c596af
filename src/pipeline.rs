//! The end-to-end sentiment pipeline.
//!
//! ```text
//! review → ReviewNormalizer → FeatureProjector → StackedClassifier → SentimentReport
//! ```
//!
//! Everything is loaded once and only read afterwards.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Serialize;

use crate::analysis::analyzer::review::ReviewNormalizer;
use crate::analysis::emoji::EmojiCatalog;
use crate::analysis::lexicon::LexicalResources;
use crate::config::AppConfig;
use crate::error::{Result, UlasanError};
use crate::ml::classifier::Prediction;
use crate::ml::features::{FeatureProjector, FeatureSelector};
use crate::ml::models::load_classifier;
use crate::ml::stacked::StackedClassifier;
use crate::ml::tfidf::TfIdfVectorizer;

/// Message shown when a review is empty.
pub const MISSING_INPUT_MESSAGE: &str = "Please enter review text first.";

/// Outcome of analyzing one review.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentReport {
    pub review: String,
    pub normalized: String,
    pub base: Prediction,
    pub hybrid: Prediction,
    pub elapsed_ms: f64,
    pub timestamp: DateTime<Utc>,
}

/// What the pipeline has loaded.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub normalizer_stages: Vec<&'static str>,
    pub vocabulary_size: usize,
    pub ngram_range: (usize, usize),
    pub selected_features: usize,
    pub base_model: &'static str,
    pub base_input_width: usize,
    pub meta_model: &'static str,
    pub meta_input_width: usize,
}

/// Normalizer, projector and stacked classifier wired together.
#[derive(Debug, Clone)]
pub struct SentimentPipeline {
    normalizer: ReviewNormalizer,
    projector: FeatureProjector,
    classifier: StackedClassifier,
}

impl SentimentPipeline {
    /// Wire the parts; the base model must take the projector's rows.
    pub fn new(
        normalizer: ReviewNormalizer,
        projector: FeatureProjector,
        classifier: StackedClassifier,
    ) -> Result<Self> {
        let base = classifier.base();
        if base.input_width() != projector.output_width() {
            return Err(UlasanError::model(format!(
                "base model {} expects {} features, the projector yields {}",
                base.name(),
                base.input_width(),
                projector.output_width()
            )));
        }
        Ok(SentimentPipeline {
            normalizer,
            projector,
            classifier,
        })
    }

    /// Load resources and artifacts named by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let resources = LexicalResources::load(&config.resource_paths())?;
        let normalizer = ReviewNormalizer::new(&resources, Arc::new(EmojiCatalog::new()?))?;

        let vectorizer = TfIdfVectorizer::load(config.vectorizer_path())?;
        let selector = FeatureSelector::load(config.selected_features_path())?;
        let projector = FeatureProjector::new(vectorizer, selector)?;

        let base = load_classifier(config.base_model_path())?;
        let meta = load_classifier(config.meta_model_path())?;
        let classifier = StackedClassifier::new(base, meta)?;

        Self::new(normalizer, projector, classifier)
    }

    /// Analyze one review.
    ///
    /// An empty or whitespace-only review fails with
    /// [`UlasanError::MissingInput`] before any normalization or inference.
    pub fn analyze(&self, review: &str) -> Result<SentimentReport> {
        if review.trim().is_empty() {
            warn!("{MISSING_INPUT_MESSAGE}");
            return Err(UlasanError::missing_input(MISSING_INPUT_MESSAGE));
        }

        let started = Instant::now();
        let normalized = self.normalizer.process(review)?;
        let features = self.projector.project(&normalized)?;
        let prediction = self.classifier.predict(&features)?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        debug!("analyzed review in {elapsed_ms:.3} ms");

        Ok(SentimentReport {
            review: review.to_string(),
            normalized,
            base: prediction.base,
            hybrid: prediction.meta,
            elapsed_ms,
            timestamp: Utc::now(),
        })
    }

    pub fn summary(&self) -> PipelineSummary {
        let vectorizer = self.projector.vectorizer();
        PipelineSummary {
            normalizer_stages: self.normalizer.stage_names(),
            vocabulary_size: vectorizer.vocabulary_size(),
            ngram_range: vectorizer.ngram_range(),
            selected_features: self.projector.output_width(),
            base_model: self.classifier.base().name(),
            base_input_width: self.classifier.base().input_width(),
            meta_model: self.classifier.meta().name(),
            meta_input_width: self.classifier.meta().input_width(),
        }
    }

    pub fn normalizer(&self) -> &ReviewNormalizer {
        &self.normalizer
    }

    pub fn projector(&self) -> &FeatureProjector {
        &self.projector
    }

    pub fn classifier(&self) -> &StackedClassifier {
        &self.classifier
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::ml::classifier::{ClassProbabilities, Classifier, SentimentLabel};
    use crate::ml::models::LogisticRegression;

    /// Counts calls and always answers with a fixed raw label.
    #[derive(Debug)]
    struct FixedClassifier {
        width: usize,
        classes: [i64; 2],
        calls: Arc<AtomicUsize>,
    }

    impl Classifier for FixedClassifier {
        fn predict_proba(&self, _row: &[f64]) -> Result<ClassProbabilities> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ClassProbabilities::new(0.2, 0.8))
        }

        fn classes(&self) -> [i64; 2] {
            self.classes
        }

        fn input_width(&self) -> usize {
            self.width
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn pipeline(meta_classes: [i64; 2], calls: Arc<AtomicUsize>) -> SentimentPipeline {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer
            .fit(&["aplikasi bagus", "aplikasi jelek", "tidak bagus"])
            .unwrap();
        let bagus = vectorizer.term_index("bagus").unwrap();
        let jelek = vectorizer.term_index("jelek").unwrap();
        let projector =
            FeatureProjector::new(vectorizer, FeatureSelector::new(vec![bagus, jelek])).unwrap();

        let base = Arc::new(LogisticRegression::new(vec![5.0, -5.0], 0.0));
        let meta = Arc::new(FixedClassifier {
            width: 2,
            classes: meta_classes,
            calls,
        });
        let classifier = StackedClassifier::new(base, meta).unwrap();

        SentimentPipeline::new(ReviewNormalizer::builtin().unwrap(), projector, classifier).unwrap()
    }

    #[test]
    fn test_analyze() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = pipeline([-1, 1], calls.clone());

        let report = pipeline.analyze("Aplikasinya BAGUSSS!!").unwrap();
        assert_eq!(report.normalized, "aplikasi bagus");
        assert_eq!(report.base.label, SentimentLabel::Positive);
        assert_eq!(report.hybrid.label, SentimentLabel::Positive);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let report = pipeline.analyze("jelek").unwrap();
        assert_eq!(report.base.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_missing_input_skips_inference() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = pipeline([-1, 1], calls.clone());

        for review in ["", "   ", "\n\t"] {
            let err = pipeline.analyze(review).unwrap_err();
            assert!(err.is_recoverable());
            assert!(matches!(err, UlasanError::MissingInput(_)));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unknown_label_is_not_an_error() {
        let pipeline = pipeline([0, 2], Arc::new(AtomicUsize::new(0)));
        let report = pipeline.analyze("bagus").unwrap();
        assert_eq!(report.hybrid.label, SentimentLabel::Unknown(2));
        assert_eq!(report.hybrid.label.to_string(), "Unknown");
    }

    #[test]
    fn test_base_width_must_match_projector() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&["bagus"]).unwrap();
        let projector = FeatureProjector::new(vectorizer, FeatureSelector::new(vec![0])).unwrap();
        let base = Arc::new(LogisticRegression::new(vec![1.0, 1.0], 0.0));
        let meta = Arc::new(LogisticRegression::new(vec![1.0, 1.0], 0.0));
        let classifier = StackedClassifier::new(base, meta).unwrap();

        let result =
            SentimentPipeline::new(ReviewNormalizer::builtin().unwrap(), projector, classifier);
        assert!(result.is_err());
    }

    #[test]
    fn test_summary() {
        let summary = pipeline([-1, 1], Arc::new(AtomicUsize::new(0))).summary();
        assert_eq!(summary.selected_features, 2);
        assert_eq!(summary.base_model, "logistic");
        assert_eq!(summary.meta_model, "fixed");
        assert_eq!(summary.meta_input_width, 2);
        assert_eq!(summary.normalizer_stages.last(), Some(&"stem"));
    }
}
