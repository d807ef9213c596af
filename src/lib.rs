//! # ulasan
//!
//! Sentiment classification of Indonesian app reviews.
//!
//! ## Features
//!
//! - Review normalization: emoji, URLs, slang, elongated words, stopwords, stemming
//! - TF-IDF features with a fixed feature selection
//! - Stacked inference: a base model and a hybrid meta model
//! - A command line shell with one-shot, batch and interactive modes
//!
//! ```no_run
//! use ulasan::config::AppConfig;
//! use ulasan::pipeline::SentimentPipeline;
//!
//! # fn main() -> ulasan::error::Result<()> {
//! let config = AppConfig::default().with_artifact_dir("artifacts");
//! let pipeline = SentimentPipeline::from_config(&config)?;
//! let report = pipeline.analyze("Aplikasinya bagus banget 😍")?;
//! println!("{} / {}", report.base.label, report.hybrid.label);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod ml;
pub mod pipeline;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
