//! Feature extraction and classifiers for review sentiment.
//!
//! ```text
//! normalized text → TfIdfVectorizer → FeatureSelector → base model → meta model
//!                   └──────── FeatureProjector ───────┘  └── StackedClassifier ──┘
//! ```
//!
//! Every artifact is plain JSON. Models carry a `kind` tag and are loaded
//! into a [`classifier::Classifier`] trait object; see [`models`].

pub mod classifier;
pub mod features;
pub mod models;
pub mod stacked;
pub mod tfidf;

pub use classifier::{ClassProbabilities, Classifier, Prediction, SentimentLabel};
pub use features::{FeatureProjector, FeatureRow, FeatureSelector};
pub use models::ModelArtifact;
pub use stacked::{MetaFeatures, StackedClassifier, StackedPrediction};
pub use tfidf::TfIdfVectorizer;
