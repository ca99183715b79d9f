//! Error types for the edgar-digest CLI.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, LLM providers, EDGAR retrieval,
//! and the summarization pipeline.

use thiserror::Error;

/// Unified error type for the edgar-digest CLI.
///
/// All fallible functions in the application return `Result<T, AppError>`.
/// Errors are propagated, never panicked on.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors, including missing credentials
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// EDGAR retrieval and document conversion errors
    #[error("Filings error: {0}")]
    Filings(String),

    /// Summarization pipeline errors
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
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
