//! Error types for shoprank.
//!
//! Three failure classes exist: a missing input source, a local parse failure
//! that only ever costs the single item being parsed, and everything else.
//! Only the first and last ever reach the caller as errors.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for shoprank operations.
#[derive(Debug, Error)]
pub enum ShoprankError {
    /// The input source does not exist.
    #[error("{kind} file not found: {}", .path.display())]
    NotFound {
        /// What the file was supposed to contain (e.g. "Snapshot").
        kind: String,
        /// The path that was looked up.
        path: PathBuf,
    },

    /// A single line or record could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// One-based line number within the input.
        line: usize,
        /// Description of the failure.
        message: String,
    },

    /// An unknown priority mode was requested.
    #[error("Invalid priority '{0}': expected one of rating, reviews, price, features")]
    InvalidPriority(String),

    /// Configuration could not be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The input contained no usable records.
    #[error("No products found in {}", .0.display())]
    Empty(PathBuf),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A budget that cannot bound a price.
    #[error("Invalid budget {0}: expected a finite, non-negative amount")]
    InvalidBudget(f64),
}

impl ShoprankError {
    /// Creates a not-found error for the given path.
    #[must_use]
    pub fn not_found(kind: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Maps an IO error on `path` to `NotFound` when the file is missing.
    #[must_use]
    pub fn from_io(kind: &str, path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(kind, path)
        } else {
            Self::Io(err)
        }
    }
}

impl From<serde_json::Error> for ShoprankError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Structured failure payload written in place of a result.
///
/// There is no partial-success format: on failure the product collection is
/// always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Human-readable error message.
    pub error: String,
    /// Always empty.
    pub products: Vec<serde_json::Value>,
}

impl ErrorPayload {
    /// Creates a payload from any message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            products: Vec::new(),
        }
    }
}

impl From<&ShoprankError> for ErrorPayload {
    fn from(err: &ShoprankError) -> Self {
        Self::new(err.to_string())
    }
}
