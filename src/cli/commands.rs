//! Command implementations for the ulasan CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use log::{error, info};

use crate::analysis::analyzer::review::ReviewNormalizer;
use crate::analysis::emoji::EmojiCatalog;
use crate::analysis::lexicon::LexicalResources;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{AppConfig, LabelNames};
use crate::error::{Result, UlasanError};
use crate::pipeline::{MISSING_INPUT_MESSAGE, SentimentPipeline};

/// Words that end the interactive prompt.
const EXIT_WORDS: &[&str] = &["exit", "quit"];

/// Execute a CLI command.
pub fn execute_command(args: UlasanArgs) -> Result<()> {
    let config = AppConfig::resolve(args.config.as_deref(), args.artifact_dir.clone())?;

    match &args.command {
        Command::Predict(predict_args) => predict(predict_args, &config, &args),
        Command::Normalize(normalize_args) => normalize(normalize_args, &config, &args),
        Command::Interactive(interactive_args) => interactive(interactive_args, &config, &args),
        Command::Inspect => inspect(&config, &args),
    }
}

fn load_pipeline(config: &AppConfig) -> Result<SentimentPipeline> {
    info!("Loading artifacts from {}", config.artifact_dir.display());
    SentimentPipeline::from_config(config)
}

/// Analyze one review and render the outcome.
///
/// Missing input is reported as a warning and is not an error. Any other
/// failure is returned without printing a partial result.
pub fn run_review<W: Write>(
    out: &mut W,
    pipeline: &SentimentPipeline,
    review: &str,
    labels: &LabelNames,
    args: &UlasanArgs,
) -> Result<bool> {
    match pipeline.analyze(review) {
        Ok(report) => {
            write_report(out, &report, labels, args)?;
            Ok(true)
        }
        Err(e) if e.is_recoverable() => {
            write_warning(out, MISSING_INPUT_MESSAGE, args)?;
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Classify a single review or a file of reviews.
fn predict(args: &PredictArgs, config: &AppConfig, cli_args: &UlasanArgs) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.file {
        Some(path) => predict_file(&mut out, &pipeline, path, config, cli_args),
        None => {
            let review = args.text.as_deref().unwrap_or("");
            run_review(&mut out, &pipeline, review, &config.labels, cli_args)?;
            Ok(())
        }
    }
}

/// One interaction per non-empty line, in order. A failing line is reported
/// and the next line still runs.
fn predict_file<W: Write>(
    out: &mut W,
    pipeline: &SentimentPipeline,
    path: &Path,
    config: &AppConfig,
    cli_args: &UlasanArgs,
) -> Result<()> {
    let reader = BufReader::new(File::open(path)?);
    let mut summary = BatchSummary::default();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            summary.skipped_empty += 1;
            continue;
        }
        match run_review(out, pipeline, &line, &config.labels, cli_args) {
            Ok(_) => summary.analyzed += 1,
            Err(e) => {
                error!("line {}: {e}", line_num + 1);
                summary.failed += 1;
            }
        }
    }

    write_batch_summary(out, &summary, cli_args)?;

    if summary.failed > 0 {
        return Err(UlasanError::other(format!(
            "{} of {} reviews failed",
            summary.failed,
            summary.failed + summary.analyzed
        )));
    }
    Ok(())
}

/// Show the normalized form of a review. Needs no artifacts.
fn normalize(args: &NormalizeArgs, config: &AppConfig, cli_args: &UlasanArgs) -> Result<()> {
    let resources = LexicalResources::load(&config.resource_paths())?;
    let normalizer = ReviewNormalizer::new(&resources, Arc::new(EmojiCatalog::new()?))?;

    let stages = if args.trace {
        Some(normalizer.trace(&args.text)?)
    } else {
        None
    };
    let normalized = match &stages {
        Some(stages) => stages.last().map(|s| s.text.clone()).unwrap_or_default(),
        None => normalizer.process(&args.text)?,
    };

    let result = NormalizationResult {
        review: args.text.clone(),
        normalized,
        stages,
    };
    write_normalization(&mut io::stdout().lock(), &result, cli_args)
}

/// Prompt loop over stdin.
fn interactive(args: &InteractiveArgs, config: &AppConfig, cli_args: &UlasanArgs) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_interactive(
        stdin.lock(),
        &mut stdout.lock(),
        &pipeline,
        &args.prompt,
        &config.labels,
        cli_args,
    )
}

/// Read one review per line until `exit`, `quit` or end of input.
///
/// Empty lines warn and prompt again. A failing review is reported and the
/// loop goes on.
pub fn run_interactive<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    pipeline: &SentimentPipeline,
    prompt: &str,
    labels: &LabelNames,
    args: &UlasanArgs,
) -> Result<()> {
    let show_prompt = args.output_format == OutputFormat::Human;
    let mut line = String::new();

    loop {
        if show_prompt {
            write!(out, "{prompt}")?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let review = line.trim_end_matches(['\n', '\r']);
        if EXIT_WORDS.contains(&review.trim()) {
            break;
        }

        if let Err(e) = run_review(out, pipeline, review, labels, args) {
            error!("{e}");
            writeln!(out, "Error: {e}")?;
        }
    }

    if show_prompt {
        writeln!(out)?;
    }
    Ok(())
}

/// Summarize the loaded artifacts.
fn inspect(config: &AppConfig, cli_args: &UlasanArgs) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    write_summary(&mut io::stdout().lock(), &pipeline.summary(), cli_args)
}
