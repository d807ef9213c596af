//! Concrete model kinds and their JSON artifacts.
//!
//! Every artifact is an object tagged by `kind`:
//!
//! ```json
//! {"kind": "logistic", "weights": [1.5, -2.0], "intercept": 0.1}
//! ```
//!
//! `classes` is optional everywhere and defaults to `[-1, 1]`.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UlasanError};
use crate::ml::classifier::{ClassProbabilities, Classifier, check_width, default_classes};

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Binary logistic regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub weights: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default = "default_classes")]
    pub classes: [i64; 2],
}

impl LogisticRegression {
    pub fn new(weights: Vec<f64>, intercept: f64) -> Self {
        LogisticRegression {
            weights,
            intercept,
            classes: default_classes(),
        }
    }
}

impl Classifier for LogisticRegression {
    fn predict_proba(&self, row: &[f64]) -> Result<ClassProbabilities> {
        check_width(self.name(), self.weights.len(), row)?;
        let positive = sigmoid(dot(&self.weights, row) + self.intercept);
        Ok(ClassProbabilities::new(1.0 - positive, positive))
    }

    fn classes(&self) -> [i64; 2] {
        self.classes
    }

    fn input_width(&self) -> usize {
        self.weights.len()
    }

    fn name(&self) -> &'static str {
        "logistic"
    }
}

/// Hidden-layer activation of an extreme learning machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Sigmoid,
    Tanh,
    Relu,
}

impl Activation {
    fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid(x),
            Activation::Tanh => x.tanh(),
            Activation::Relu => x.max(0.0),
        }
    }
}

/// Single-hidden-layer network with random input weights and solved output
/// weights.
///
/// `input_weights` holds one row per hidden unit; `output_weights` holds one
/// `[negative, positive]` pair per hidden unit. The class scores go through a
/// softmax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeLearningMachine {
    pub input_weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
    pub output_weights: Vec<[f64; 2]>,
    #[serde(default = "default_classes")]
    pub classes: [i64; 2],
}

impl ExtremeLearningMachine {
    fn validate(&self) -> Result<()> {
        let hidden = self.input_weights.len();
        if hidden == 0 {
            return Err(UlasanError::model("extreme learning machine has no hidden units"));
        }
        if self.biases.len() != hidden || self.output_weights.len() != hidden {
            return Err(UlasanError::model(format!(
                "extreme learning machine has {hidden} hidden units but {} biases and {} output rows",
                self.biases.len(),
                self.output_weights.len()
            )));
        }
        let width = self.input_width();
        if self.input_weights.iter().any(|w| w.len() != width) {
            return Err(UlasanError::model(
                "extreme learning machine input weight rows differ in width",
            ));
        }
        Ok(())
    }
}

impl Classifier for ExtremeLearningMachine {
    fn predict_proba(&self, row: &[f64]) -> Result<ClassProbabilities> {
        check_width(self.name(), self.input_width(), row)?;

        let mut scores = [0.0f64; 2];
        for ((weights, bias), output) in self
            .input_weights
            .iter()
            .zip(&self.biases)
            .zip(&self.output_weights)
        {
            let h = self.activation.apply(dot(weights, row) + bias);
            scores[0] += h * output[0];
            scores[1] += h * output[1];
        }

        let max = scores[0].max(scores[1]);
        let exp = [(scores[0] - max).exp(), (scores[1] - max).exp()];
        let sum = exp[0] + exp[1];
        Ok(ClassProbabilities::new(exp[0] / sum, exp[1] / sum))
    }

    fn classes(&self) -> [i64; 2] {
        self.classes
    }

    fn input_width(&self) -> usize {
        self.input_weights.first().map_or(0, Vec::len)
    }

    fn name(&self) -> &'static str {
        "extreme_learning_machine"
    }
}

/// A node of a flattened decision tree.
///
/// Split nodes carry `feature`, `threshold`, `left` and `right`; rows with
/// `row[feature] <= threshold` go left. Leaf nodes carry `value`, the class
/// weights `[negative, positive]` (counts or probabilities).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<usize>,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub left: usize,
    #[serde(default)]
    pub right: usize,
    #[serde(default)]
    pub value: [f64; 2],
}

impl TreeNode {
    pub fn split(feature: usize, threshold: f64, left: usize, right: usize) -> Self {
        TreeNode {
            feature: Some(feature),
            threshold,
            left,
            right,
            value: [0.0, 0.0],
        }
    }

    pub fn leaf(negative: f64, positive: f64) -> Self {
        TreeNode {
            feature: None,
            threshold: 0.0,
            left: 0,
            right: 0,
            value: [negative, positive],
        }
    }
}

/// Decision tree stored as a node list; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Children must come after their parent, so walking always ends.
    fn validate(&self, n_features: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(UlasanError::model("decision tree has no nodes"));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node.feature {
                Some(feature) => {
                    if feature >= n_features {
                        return Err(UlasanError::model(format!(
                            "tree node {idx} splits on feature {feature} of {n_features}"
                        )));
                    }
                    for child in [node.left, node.right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(UlasanError::model(format!(
                                "tree node {idx} has invalid child {child}"
                            )));
                        }
                    }
                }
                None => {
                    let total = node.value[0] + node.value[1];
                    if !(total > 0.0) || node.value.iter().any(|v| *v < 0.0) {
                        return Err(UlasanError::model(format!(
                            "tree leaf {idx} has invalid class weights"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Leaf class probabilities for one row.
    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2]> {
        let mut idx = 0;
        loop {
            let node = self
                .nodes
                .get(idx)
                .ok_or_else(|| UlasanError::model(format!("tree has no node {idx}")))?;
            match node.feature {
                Some(feature) => {
                    let value = row.get(feature).copied().unwrap_or(0.0);
                    idx = if value <= node.threshold { node.left } else { node.right };
                }
                None => {
                    let total = node.value[0] + node.value[1];
                    return Ok([node.value[0] / total, node.value[1] / total]);
                }
            }
        }
    }
}

/// Averaged probabilities of a set of decision trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
    #[serde(default = "default_classes")]
    pub classes: [i64; 2],
}

impl RandomForest {
    fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(UlasanError::model("random forest has no trees"));
        }
        self.trees
            .iter()
            .try_for_each(|tree| tree.validate(self.n_features))
    }
}

impl Classifier for RandomForest {
    fn predict_proba(&self, row: &[f64]) -> Result<ClassProbabilities> {
        check_width(self.name(), self.n_features, row)?;

        let mut sum = [0.0f64; 2];
        for tree in &self.trees {
            let [negative, positive] = tree.predict_proba(row)?;
            sum[0] += negative;
            sum[1] += positive;
        }
        let n = self.trees.len() as f64;
        Ok(ClassProbabilities::new(sum[0] / n, sum[1] / n))
    }

    fn classes(&self) -> [i64; 2] {
        self.classes
    }

    fn input_width(&self) -> usize {
        self.n_features
    }

    fn name(&self) -> &'static str {
        "random_forest"
    }
}

/// A model artifact of any supported kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Logistic(LogisticRegression),
    ExtremeLearningMachine(ExtremeLearningMachine),
    RandomForest(RandomForest),
}

impl ModelArtifact {
    /// Parse and validate a model artifact.
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Load a model artifact from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            UlasanError::model(format!("cannot read model {}: {e}", path.display()))
        })?;
        let artifact = Self::from_json(&content)
            .map_err(|e| UlasanError::model(format!("invalid model {}: {e}", path.display())))?;
        info!(
            "Loaded {} model from {} ({} features)",
            artifact.kind(),
            path.display(),
            artifact.input_width()
        );
        Ok(artifact)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        match self {
            ModelArtifact::Logistic(model) if model.weights.is_empty() => {
                Err(UlasanError::model("logistic model has no weights"))
            }
            ModelArtifact::Logistic(_) => Ok(()),
            ModelArtifact::ExtremeLearningMachine(model) => model.validate(),
            ModelArtifact::RandomForest(model) => model.validate(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.as_classifier().name()
    }

    pub fn input_width(&self) -> usize {
        self.as_classifier().input_width()
    }

    fn as_classifier(&self) -> &dyn Classifier {
        match self {
            ModelArtifact::Logistic(model) => model,
            ModelArtifact::ExtremeLearningMachine(model) => model,
            ModelArtifact::RandomForest(model) => model,
        }
    }

    /// Turn the artifact into a shareable classifier.
    pub fn into_classifier(self) -> Arc<dyn Classifier> {
        match self {
            ModelArtifact::Logistic(model) => Arc::new(model),
            ModelArtifact::ExtremeLearningMachine(model) => Arc::new(model),
            ModelArtifact::RandomForest(model) => Arc::new(model),
        }
    }
}

/// Load a model artifact straight into a classifier.
pub fn load_classifier<P: AsRef<Path>>(path: P) -> Result<Arc<dyn Classifier>> {
    Ok(ModelArtifact::load(path)?.into_classifier())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::classifier::SentimentLabel;

    #[test]
    fn test_logistic() {
        let model = LogisticRegression::new(vec![2.0, -2.0], 0.0);
        let probabilities = model.predict_proba(&[1.0, 0.0]).unwrap();
        assert!(probabilities.positive > 0.8);
        assert!((probabilities.negative + probabilities.positive - 1.0).abs() < 1e-12);
        assert_eq!(model.predict(&[1.0, 0.0]).unwrap(), 1);
        assert_eq!(model.predict(&[0.0, 1.0]).unwrap(), -1);
        assert!(model.predict_proba(&[1.0]).is_err());
    }

    #[test]
    fn test_extreme_learning_machine() {
        let json = r#"{
            "kind": "extreme_learning_machine",
            "input_weights": [[1.0, 0.0], [0.0, 1.0]],
            "biases": [0.0, 0.0],
            "activation": "relu",
            "output_weights": [[0.0, 3.0], [3.0, 0.0]]
        }"#;
        let model = ModelArtifact::from_json(json).unwrap().into_classifier();
        assert_eq!(model.name(), "extreme_learning_machine");
        assert_eq!(model.input_width(), 2);

        let prediction = model.classify(&[1.0, 0.0]).unwrap();
        assert_eq!(prediction.label, SentimentLabel::Positive);
        assert!(prediction.probabilities.positive > 0.9);

        let prediction = model.classify(&[0.0, 1.0]).unwrap();
        assert_eq!(prediction.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_extreme_learning_machine_shape_checked() {
        let json = r#"{
            "kind": "extreme_learning_machine",
            "input_weights": [[1.0, 0.0], [0.0]],
            "biases": [0.0, 0.0],
            "output_weights": [[0.0, 1.0], [1.0, 0.0]]
        }"#;
        assert!(ModelArtifact::from_json(json).is_err());
    }

    #[test]
    fn test_random_forest() {
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::split(0, 0.5, 1, 2),
                TreeNode::leaf(8.0, 2.0),
                TreeNode::leaf(0.0, 4.0),
            ],
        };
        let stump = DecisionTree {
            nodes: vec![TreeNode::leaf(1.0, 1.0)],
        };
        let forest = RandomForest {
            n_features: 2,
            trees: vec![tree, stump],
            classes: default_classes(),
        };
        ModelArtifact::RandomForest(forest.clone()).validate().unwrap();

        let low = forest.predict_proba(&[0.2, 0.0]).unwrap();
        assert!((low.negative - 0.65).abs() < 1e-12);
        let high = forest.predict_proba(&[0.9, 0.0]).unwrap();
        assert!((high.positive - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_random_forest_rejects_cycles() {
        let json = r#"{
            "kind": "random_forest",
            "n_features": 1,
            "trees": [{"nodes": [{"feature": 0, "threshold": 0.5, "left": 0, "right": 0}]}]
        }"#;
        assert!(ModelArtifact::from_json(json).is_err());
    }

    #[test]
    fn test_unknown_kind_is_error() {
        assert!(ModelArtifact::from_json(r#"{"kind": "svm"}"#).is_err());
    }

    #[test]
    fn test_custom_classes() {
        let json = r#"{"kind": "logistic", "weights": [1.0], "classes": [0, 1]}"#;
        let model = ModelArtifact::from_json(json).unwrap().into_classifier();
        let prediction = model.classify(&[-3.0]).unwrap();
        assert_eq!(prediction.raw_label, 0);
        assert_eq!(prediction.label, SentimentLabel::Unknown(0));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let artifact = ModelArtifact::Logistic(LogisticRegression::new(vec![0.5, 0.25], -0.1));
        artifact.save(&path).unwrap();

        let classifier = load_classifier(&path).unwrap();
        assert_eq!(classifier.name(), "logistic");
        assert_eq!(classifier.input_width(), 2);
        assert_eq!(ModelArtifact::load(&path).unwrap(), artifact);
    }
}
