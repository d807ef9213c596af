//! End-to-end tests over artifacts written to a temporary directory.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use ulasan::analysis::analyzer::review::ReviewNormalizer;
use ulasan::cli::args::UlasanArgs;
use ulasan::cli::commands::{run_interactive, run_review};
use ulasan::config::AppConfig;
use ulasan::error::{Result, UlasanError};
use ulasan::ml::classifier::SentimentLabel;
use ulasan::ml::models::{LogisticRegression, ModelArtifact};
use ulasan::ml::tfidf::TfIdfVectorizer;
use ulasan::pipeline::{MISSING_INPUT_MESSAGE, SentimentPipeline};

const TRAINING_REVIEWS: &[&str] = &[
    "Aplikasinya bagus banget, sangat membantu",
    "mantap, pembayaran cepat",
    "aplikasi jelek, sering error",
    "kecewa, pembayaran gagal terus",
];

/// Write a full artifact set where "bagus" and "mantap" push towards
/// positive, "jelek" and "kecewa" towards negative.
fn write_artifacts(dir: &Path, meta_classes: [i64; 2]) -> Result<()> {
    let normalizer = ReviewNormalizer::builtin()?;
    let normalized = TRAINING_REVIEWS
        .iter()
        .map(|r| normalizer.process(r))
        .collect::<Result<Vec<_>>>()?;
    let docs: Vec<&str> = normalized.iter().map(String::as_str).collect();

    let mut vectorizer = TfIdfVectorizer::new();
    vectorizer.fit(&docs)?;
    vectorizer.save(dir.join("tfidf.json"))?;

    let columns: Vec<usize> = ["bagus", "mantap", "jelek", "kecewa"]
        .iter()
        .map(|term| vectorizer.term_index(term).expect("term in vocabulary"))
        .collect();
    // 1-based column names, as exported by the training notebooks.
    let names: Vec<String> = columns.iter().map(|c| format!("feature_{}", c + 1)).collect();
    fs::write(
        dir.join("selected_features.json"),
        serde_json::to_string(&names)?,
    )?;

    ModelArtifact::Logistic(LogisticRegression::new(vec![6.0, 6.0, -6.0, -6.0], 0.0))
        .save(dir.join("base_model.json"))?;

    let meta = format!(
        r#"{{"kind": "logistic", "weights": [-4.0, 4.0], "intercept": 0.0, "classes": [{}, {}]}}"#,
        meta_classes[0], meta_classes[1]
    );
    fs::write(dir.join("meta_model.json"), meta)?;
    Ok(())
}

fn pipeline_in(dir: &TempDir, meta_classes: [i64; 2]) -> SentimentPipeline {
    write_artifacts(dir.path(), meta_classes).unwrap();
    let config = AppConfig::default().with_artifact_dir(dir.path());
    SentimentPipeline::from_config(&config).unwrap()
}

#[test]
fn test_positive_and_negative_reviews() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir, [-1, 1]);

    let report = pipeline.analyze("Aplikasinya BAGUSSS banget😍😍😍").unwrap();
    assert_eq!(report.base.label, SentimentLabel::Positive);
    assert_eq!(report.hybrid.label, SentimentLabel::Positive);
    let sum = report.base.probabilities.negative + report.base.probabilities.positive;
    assert!((sum - 1.0).abs() < 1e-9);

    let report = pipeline.analyze("JELEK!!! bikin kecewa 😡").unwrap();
    assert_eq!(report.base.label, SentimentLabel::Negative);
    assert_eq!(report.hybrid.label, SentimentLabel::Negative);
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir, [-1, 1]);

    for review in ["", "   "] {
        match pipeline.analyze(review) {
            Err(UlasanError::MissingInput(message)) => assert_eq!(message, MISSING_INPUT_MESSAGE),
            other => panic!("expected missing input, got {other:?}"),
        }
    }
}

#[test]
fn test_unknown_meta_label() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir, [0, 5]);

    let report = pipeline.analyze("bagus").unwrap();
    assert_eq!(report.hybrid.raw_label, 5);
    assert_eq!(report.hybrid.label, SentimentLabel::Unknown(5));
    assert_eq!(report.base.label, SentimentLabel::Positive);
}

#[test]
fn test_missing_artifact_is_error() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path(), [-1, 1]).unwrap();
    fs::remove_file(dir.path().join("meta_model.json")).unwrap();

    let config = AppConfig::default().with_artifact_dir(dir.path());
    assert!(SentimentPipeline::from_config(&config).is_err());
}

#[test]
fn test_out_of_range_feature_is_error() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path(), [-1, 1]).unwrap();
    fs::write(dir.path().join("selected_features.json"), "[0, 100000]").unwrap();

    let config = AppConfig::default().with_artifact_dir(dir.path());
    assert!(SentimentPipeline::from_config(&config).is_err());
}

#[test]
fn test_run_review_warns_on_empty_input() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir, [-1, 1]);
    let args = UlasanArgs::try_parse_from(["ulasan", "interactive"]).unwrap();
    let labels = AppConfig::default().labels;

    let mut out = Vec::new();
    let analyzed = run_review(&mut out, &pipeline, "  ", &labels, &args).unwrap();
    assert!(!analyzed);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("Warning: {MISSING_INPUT_MESSAGE}\n")
    );
}

#[test]
fn test_interactive_session() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir, [-1, 1]);
    let args = UlasanArgs::try_parse_from(["ulasan", "interactive"]).unwrap();
    let labels = AppConfig::default().labels;

    let input = Cursor::new("mantap sekali\n\njelek\nquit\nbagus\n");
    let mut out = Vec::new();
    run_interactive(input, &mut out, &pipeline, "> ", &labels, &args).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text.matches("Base model").count(), 2);
    assert_eq!(text.matches(MISSING_INPUT_MESSAGE).count(), 1);
    assert!(text.contains("Sentiment:            Positive"));
    assert!(text.contains("Sentiment:            Negative"));
    // The review after "quit" is never analyzed.
    assert_eq!(text.matches("> ").count(), 4);
}

#[test]
fn test_interactive_json_has_no_prompt() {
    let dir = TempDir::new().unwrap();
    let pipeline = pipeline_in(&dir, [-1, 1]);
    let args = UlasanArgs::try_parse_from(["ulasan", "-f", "json", "interactive"]).unwrap();
    let labels = AppConfig::default().labels;

    let mut out = Vec::new();
    run_interactive(Cursor::new("bagus\n"), &mut out, &pipeline, "> ", &labels, &args).unwrap();
    let text = String::from_utf8(out).unwrap();
    let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(value["hybrid"]["label"], "Positive");
    assert_eq!(value["review"], "bagus");
}
