//! Output formatting for CLI commands.
//!
//! Every writer takes the destination explicitly so the interactive loop and
//! tests can render into any `Write`.

use std::io::Write;

use serde::Serialize;

use crate::analysis::analyzer::review::StageOutput;
use crate::cli::args::{OutputFormat, UlasanArgs};
use crate::config::LabelNames;
use crate::error::Result;
use crate::ml::classifier::Prediction;
use crate::pipeline::{PipelineSummary, SentimentReport};

/// Result structure for the normalize command.
#[derive(Debug, Serialize)]
pub struct NormalizationResult {
    pub review: String,
    pub normalized: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<StageOutput>>,
}

/// Result structure for a batch run.
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub analyzed: usize,
    pub skipped_empty: usize,
    pub failed: usize,
}

/// Output a serializable value as JSON on one line, or pretty-printed.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, args: &UlasanArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

/// Output one analyzed review.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &SentimentReport,
    labels: &LabelNames,
    args: &UlasanArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => write_json(out, report, args),
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "Normalized: {}", report.normalized)?;
            }
            write_prediction_human(out, "Base model", &report.base, labels)?;
            write_prediction_human(out, "Hybrid model", &report.hybrid, labels)?;
            if args.verbosity() > 1 {
                writeln!(out, "({:.3} ms)", report.elapsed_ms)?;
            }
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_prediction_human<W: Write>(
    out: &mut W,
    title: &str,
    prediction: &Prediction,
    labels: &LabelNames,
) -> Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "  Sentiment:            {}", labels.render(&prediction.label))?;
    writeln!(
        out,
        "  Negative probability: {}",
        format_probability(prediction.probabilities.negative)
    )?;
    writeln!(
        out,
        "  Positive probability: {}",
        format_probability(prediction.probabilities.positive)
    )?;
    Ok(())
}

/// Output a warning that does not end the session.
pub fn write_warning<W: Write>(out: &mut W, message: &str, args: &UlasanArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => write_json(out, &serde_json::json!({ "warning": message }), args),
        OutputFormat::Human => {
            writeln!(out, "Warning: {message}")?;
            Ok(())
        }
    }
}

/// Output the result of the normalize command.
pub fn write_normalization<W: Write>(
    out: &mut W,
    result: &NormalizationResult,
    args: &UlasanArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => write_json(out, result, args),
        OutputFormat::Human => {
            if let Some(stages) = &result.stages {
                let width = stages.iter().map(|s| s.stage.len()).max().unwrap_or(0);
                for (i, stage) in stages.iter().enumerate() {
                    writeln!(out, "{:>2} {:<width$}  {}", i + 1, stage.stage, stage.text)?;
                }
                writeln!(out)?;
            }
            writeln!(out, "{}", result.normalized)?;
            Ok(())
        }
    }
}

/// Output the inspect summary.
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &PipelineSummary,
    args: &UlasanArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => write_json(out, summary, args),
        OutputFormat::Human => {
            writeln!(out, "Artifacts")?;
            writeln!(out, "═════════")?;
            writeln!(out, "Vocabulary size:    {}", summary.vocabulary_size)?;
            writeln!(
                out,
                "N-gram range:       {}..={}",
                summary.ngram_range.0, summary.ngram_range.1
            )?;
            writeln!(out, "Selected features:  {}", summary.selected_features)?;
            writeln!(
                out,
                "Base model:         {} ({} inputs)",
                summary.base_model, summary.base_input_width
            )?;
            writeln!(
                out,
                "Hybrid model:       {} ({} inputs)",
                summary.meta_model, summary.meta_input_width
            )?;
            writeln!(
                out,
                "Normalizer stages:  {}",
                summary.normalizer_stages.join(" → ")
            )?;
            Ok(())
        }
    }
}

/// Output the outcome of a batch run.
pub fn write_batch_summary<W: Write>(
    out: &mut W,
    summary: &BatchSummary,
    args: &UlasanArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => write_json(out, summary, args),
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                writeln!(
                    out,
                    "{} analyzed, {} empty, {} failed",
                    summary.analyzed, summary.skipped_empty, summary.failed
                )?;
            }
            Ok(())
        }
    }
}

/// Format a probability with four decimals.
pub fn format_probability(probability: f64) -> String {
    format!("{probability:.4}")
}
