//! Error types for the character-level BPE library.
//!
//! Fitting, encoding and decoding degrade silently on odd input, so almost
//! every variant here belongs to configuration or persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// I/O error on a caller-supplied reader or writer
    #[error("I/O error: {0}")]
    StreamIo(#[source] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Persisted state parsed but does not describe a valid vocabulary
    #[error("Corrupt tokenizer state: {0}")]
    Format(String),

    /// Token rejected by the vocabulary
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TokenizerError {
    /// True if the failure came from the underlying storage rather than the
    /// bytes it produced.
    pub fn is_io(&self) -> bool {
        match self {
            Self::Io { .. } | Self::StreamIo(_) => true,
            Self::Json(err) => err.is_io(),
            _ => false,
        }
    }

    /// True if persisted bytes were read successfully but are malformed.
    pub fn is_format(&self) -> bool {
        match self {
            Self::Format(_) | Self::InvalidToken(_) => true,
            Self::Json(err) => !err.is_io(),
            _ => false,
        }
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_classification() {
        let err = TokenizerError::StreamIo(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "short read",
        ));
        assert!(err.is_io());
        assert!(!err.is_format());
    }

    #[test]
    fn test_json_syntax_is_format() {
        let err: TokenizerError = serde_json::from_str::<u32>("{not json")
            .unwrap_err()
            .into();
        assert!(err.is_format());
        assert!(!err.is_io());
    }

    #[test]
    fn test_config_is_neither() {
        let err = TokenizerError::InvalidConfig("min_frequency must be >= 1".to_string());
        assert!(!err.is_io());
        assert!(!err.is_format());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: min_frequency must be >= 1"
        );
    }
}
