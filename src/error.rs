//! Error types for the Kontos library.
//!
//! All failures are represented by the [`KontosError`] enum. Errors surface
//! synchronously to the caller of `initialize`/`retrieve`; a retriever never
//! returns a silently truncated result list.
//!
//! # Examples
//!
//! ```
//! use kontos::error::{KontosError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(KontosError::empty_corpus("no documents loaded"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Kontos operations.
#[derive(Error, Debug)]
pub enum KontosError {
    /// I/O errors (artifact files, corpus files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// `initialize` was called over an empty document store.
    #[error("Empty corpus: {0}")]
    EmptyCorpus(String),

    /// `retrieve` was called before a successful `initialize`.
    #[error("Index not initialized: {0}")]
    NotInitialized(String),

    /// A loaded vector artifact does not match the current corpus shape.
    #[error("Vector cache mismatch: artifact has {found} rows, corpus has {expected} documents")]
    CacheCorpusMismatch {
        /// Number of documents in the current corpus.
        expected: usize,
        /// Number of rows found in the artifact.
        found: usize,
    },

    /// Failure reported by an external embedding or chat provider.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Misuse of an otherwise valid index (e.g. dimension mismatch).
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Artifact serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with KontosError.
pub type Result<T> = std::result::Result<T, KontosError>;

impl KontosError {
    /// Create a new empty-corpus error.
    pub fn empty_corpus<S: Into<String>>(msg: S) -> Self {
        KontosError::EmptyCorpus(msg.into())
    }

    /// Create a new not-initialized error.
    pub fn not_initialized<S: Into<String>>(msg: S) -> Self {
        KontosError::NotInitialized(msg.into())
    }

    /// Create a new provider error.
    pub fn provider<S: Into<String>>(msg: S) -> Self {
        KontosError::Provider(msg.into())
    }

    /// Create a new invalid-operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        KontosError::InvalidOperation(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        KontosError::Serialization(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = KontosError::empty_corpus("no documents loaded");
        assert_eq!(error.to_string(), "Empty corpus: no documents loaded");

        let error = KontosError::not_initialized("call initialize first");
        assert_eq!(
            error.to_string(),
            "Index not initialized: call initialize first"
        );

        let error = KontosError::provider("status 429");
        assert_eq!(error.to_string(), "Provider error: status 429");
    }

    #[test]
    fn test_cache_mismatch_message() {
        let error = KontosError::CacheCorpusMismatch {
            expected: 10,
            found: 7,
        };
        assert_eq!(
            error.to_string(),
            "Vector cache mismatch: artifact has 7 rows, corpus has 10 documents"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: KontosError = io_error.into();
        assert!(matches!(error, KontosError::Io(_)));
    }
}
