//! Application configuration.
//!
//! A JSON file where every field is optional:
//!
//! ```json
//! {
//!   "artifact_dir": "models",
//!   "artifacts": { "base_model": "elm.json" },
//!   "resources": { "slang": "slang-extra.tsv" },
//!   "labels": { "negative": "Negatif", "positive": "Positif" }
//! }
//! ```
//!
//! Values resolve as command line flag, then environment variable (both
//! handled by clap), then this file, then the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::lexicon::ResourcePaths;
use crate::error::{Result, UlasanError};
use crate::ml::classifier::SentimentLabel;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ULASAN_CONFIG";
/// Environment variable naming the artifact directory.
pub const ARTIFACT_DIR_ENV: &str = "ULASAN_ARTIFACT_DIR";

/// File names of the four artifacts, relative to the artifact directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactFiles {
    pub vectorizer: PathBuf,
    pub selected_features: PathBuf,
    pub base_model: PathBuf,
    pub meta_model: PathBuf,
}

impl Default for ArtifactFiles {
    fn default() -> Self {
        ArtifactFiles {
            vectorizer: PathBuf::from("tfidf.json"),
            selected_features: PathBuf::from("selected_features.json"),
            base_model: PathBuf::from("base_model.json"),
            meta_model: PathBuf::from("meta_model.json"),
        }
    }
}

/// Optional replacements for the built-in lexical resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFiles {
    pub stopwords: Option<PathBuf>,
    pub slang: Option<PathBuf>,
    pub root_words: Option<PathBuf>,
    pub emoji_words: Option<PathBuf>,
}

/// Display strings for the sentiment labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelNames {
    pub negative: String,
    pub positive: String,
    pub unknown: String,
}

impl Default for LabelNames {
    fn default() -> Self {
        LabelNames {
            negative: SentimentLabel::Negative.as_str().to_string(),
            positive: SentimentLabel::Positive.as_str().to_string(),
            unknown: SentimentLabel::Unknown(0).as_str().to_string(),
        }
    }
}

impl LabelNames {
    pub fn render(&self, label: &SentimentLabel) -> &str {
        match label {
            SentimentLabel::Negative => &self.negative,
            SentimentLabel::Positive => &self.positive,
            SentimentLabel::Unknown(_) => &self.unknown,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub artifact_dir: PathBuf,
    pub artifacts: ArtifactFiles,
    pub resources: ResourceFiles,
    pub labels: LabelNames,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            artifact_dir: PathBuf::from("artifacts"),
            artifacts: ArtifactFiles::default(),
            resources: ResourceFiles::default(),
            labels: LabelNames::default(),
        }
    }
}

impl AppConfig {
    /// Parse a configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| UlasanError::config(format!("invalid config: {e}")))
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| UlasanError::config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_json(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the effective configuration: the file if given, defaults
    /// otherwise, with `artifact_dir` overriding the file's value.
    pub fn resolve(config_file: Option<&Path>, artifact_dir: Option<PathBuf>) -> Result<Self> {
        let config = match config_file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(match artifact_dir {
            Some(dir) => config.with_artifact_dir(dir),
            None => config,
        })
    }

    pub fn with_artifact_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    fn artifact(&self, name: &Path) -> PathBuf {
        self.artifact_dir.join(name)
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.artifact(&self.artifacts.vectorizer)
    }

    pub fn selected_features_path(&self) -> PathBuf {
        self.artifact(&self.artifacts.selected_features)
    }

    pub fn base_model_path(&self) -> PathBuf {
        self.artifact(&self.artifacts.base_model)
    }

    pub fn meta_model_path(&self) -> PathBuf {
        self.artifact(&self.artifacts.meta_model)
    }

    /// Resource overrides in the form the lexicon loader takes.
    pub fn resource_paths(&self) -> ResourcePaths<'_> {
        ResourcePaths {
            stopwords: self.resources.stopwords.as_deref(),
            slang: self.resources.slang.as_deref(),
            root_words: self.resources.root_words.as_deref(),
            emoji_words: self.resources.emoji_words.as_deref(),
        }
    }
}
