//! Error types for docseek.
//!
//! A single enum covers every failure the question-answering pipeline can
//! produce, from an unreachable model backend to an unreadable PDF.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for docseek.
///
/// All components return `Result<T, AppError>`. Nothing is retried: an error
/// is terminal for the current invocation.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The text-generation backend could not be reached or timed out
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// The text-generation backend answered with an error or an unreadable body
    #[error("LLM error: {0}")]
    Llm(String),

    /// Model output could not be interpreted (e.g. no JSON array between brackets)
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// The external search facility failed to run or exited non-zero
    #[error("Search facility error: {0}")]
    SearchFacility(String),

    /// A document could not be loaded
    #[error("Failed to load document {path:?}: {reason}")]
    DocumentLoad { path: PathBuf, reason: String },

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Build a `DocumentLoad` error for `path`.
    pub fn document_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AppError::DocumentLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
