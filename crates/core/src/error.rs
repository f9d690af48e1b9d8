//! Error types for Newsdesk.
//!
//! This module defines a unified error enum covering every error category in
//! the application: configuration, I/O, generation providers, embedding
//! providers, news search, the answering pipeline, and serialization.

use thiserror::Error;

/// Unified error type for Newsdesk.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// We never panic; errors must be represented and propagated. Note that the
/// public `answer()` entry point converts every error into user-facing text
/// before it reaches a caller.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generation provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Embedding provider errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Question-answering pipeline errors
    #[error("Answer error: {0}")]
    Answer(String),

    /// Feed generation pipeline errors
    #[error("Feed error: {0}")]
    Feed(String),

    /// News search provider errors
    #[error("Search error: {0}")]
    Search(String),

    /// Prompt template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

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
