//! Error types for the ulasan library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`UlasanError`] enum.
//!
//! # Examples
//!
//! ```
//! use ulasan::error::{Result, UlasanError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(UlasanError::config("threshold must be in [0, 1]"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for ulasan operations.
///
/// Only [`UlasanError::MissingInput`] is recoverable: the caller reports it and
/// waits for the next review. Every other variant aborts the current request.
#[derive(Error, Debug)]
pub enum UlasanError {
    /// The submitted review was empty or whitespace only.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// I/O errors (artifact and resource files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (char filters, tokenization, filtering)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Lexical resource errors (stopwords, slang table, root dictionary)
    #[error("Resource error: {0}")]
    Resource(String),

    /// Feature projection errors (vectorizer, feature selection)
    #[error("Feature error: {0}")]
    Feature(String),

    /// Model errors (malformed weights, dimension mismatch)
    #[error("Model error: {0}")]
    Model(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid regular expression
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with UlasanError.
pub type Result<T> = std::result::Result<T, UlasanError>;

impl UlasanError {
    /// Create a new missing input error.
    pub fn missing_input<S: Into<String>>(msg: S) -> Self {
        UlasanError::MissingInput(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        UlasanError::Analysis(msg.into())
    }

    /// Create a new resource error.
    pub fn resource<S: Into<String>>(msg: S) -> Self {
        UlasanError::Resource(msg.into())
    }

    /// Create a new feature error.
    pub fn feature<S: Into<String>>(msg: S) -> Self {
        UlasanError::Feature(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        UlasanError::Model(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        UlasanError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        UlasanError::Other(msg.into())
    }

    /// Whether the caller may simply ask for new input and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, UlasanError::MissingInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = UlasanError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = UlasanError::model("Test model error");
        assert_eq!(error.to_string(), "Model error: Test model error");

        let error = UlasanError::feature("Test feature error");
        assert_eq!(error.to_string(), "Feature error: Test feature error");

        let error = UlasanError::resource("cannot read slang.tsv");
        assert_eq!(error.to_string(), "Resource error: cannot read slang.tsv");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = UlasanError::from(io_error);

        match error {
            UlasanError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_only_missing_input_is_recoverable() {
        assert!(UlasanError::missing_input("empty review").is_recoverable());
        assert!(!UlasanError::model("bad weights").is_recoverable());
        assert!(!UlasanError::other("boom").is_recoverable());
    }
}
