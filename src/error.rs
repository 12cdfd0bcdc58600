//! Error types
//!
//! `ApiError` is the only error that reaches the command line. Retrieval and
//! parse failures have their own types and are absorbed by the aggregator.

use thiserror::Error;

/// Top-level error for configuration, output and command execution.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("Source check failed: {0}")]
    SourceCheckFailed(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Failure of a single retrieval. Always recoverable at the URL level.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("malformed payload from {url}: {source}")]
    MalformedPayload {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no URL specified for source '{source_id}'")]
    MissingSourceUrl { source_id: String },
}

/// Failure to turn one markdown file into an agent record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no agent name could be derived from {filename}")]
    MissingName { filename: String },
}
