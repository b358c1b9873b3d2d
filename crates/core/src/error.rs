//! Error types for BPE merge training.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the training library.
#[derive(Error, Debug)]
pub enum BpeError {
    /// The corpus file does not exist
    #[error("Corpus not found: {}", path.display())]
    CorpusNotFound { path: PathBuf },

    /// Any other failure while reading or decoding the corpus
    #[error("Failed to read corpus: {source}")]
    CorpusRead {
        #[source]
        source: std::io::Error,
    },

    /// No words could be parsed from the corpus
    #[error("Corpus is empty or contains no words")]
    EmptyCorpus,

    /// Pair statistics are empty; the training loop stops here
    #[error("No mergeable pairs remain")]
    NoMergeablePairs,

    /// Writing the learned rules failed
    #[error("Failed to write merge rules to {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BpeError {
    /// Whether this error only signals the end of training rather than a failure.
    pub fn is_early_termination(&self) -> bool {
        matches!(self, BpeError::NoMergeablePairs)
    }
}

/// Result type alias for training operations.
pub type Result<T> = std::result::Result<T, BpeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path() {
        let err = BpeError::CorpusNotFound {
            path: PathBuf::from("missing.txt"),
        };
        assert_eq!(err.to_string(), "Corpus not found: missing.txt");
    }

    #[test]
    fn test_early_termination() {
        assert!(BpeError::NoMergeablePairs.is_early_termination());
        assert!(!BpeError::EmptyCorpus.is_early_termination());
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error;

        let err = BpeError::OutputWrite {
            path: PathBuf::from("out.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }
}
