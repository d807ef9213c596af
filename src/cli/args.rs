//! Command line argument parsing for the ulasan CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ARTIFACT_DIR_ENV, CONFIG_ENV};

/// ulasan - Sentiment of Indonesian app reviews
#[derive(Parser, Debug, Clone)]
#[command(name = "ulasan")]
#[command(about = "Classify the sentiment of Indonesian app reviews")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct UlasanArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "FILE", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Directory holding the vectorizer, feature list and model artifacts
    #[arg(long, value_name = "DIR", env = ARTIFACT_DIR_ENV)]
    pub artifact_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl UlasanArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify one review, or every line of a file
    Predict(PredictArgs),

    /// Show the normalized form of a review
    Normalize(NormalizeArgs),

    /// Read reviews from stdin one line at a time
    Interactive(InteractiveArgs),

    /// Summarize the loaded artifacts
    Inspect,
}

/// Arguments for classifying reviews
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Review text
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// File with one review per line
    #[arg(long, value_name = "FILE", conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

/// Arguments for normalizing a review
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Review text
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Show the text after every stage
    #[arg(long)]
    pub trace: bool,
}

/// Arguments for the interactive prompt
#[derive(Parser, Debug, Clone)]
pub struct InteractiveArgs {
    /// Prompt printed before each review
    #[arg(long, default_value = "ulasan> ")]
    pub prompt: String,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}
