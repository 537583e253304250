//! Error types for data sources.

use thiserror::Error;

/// Errors that can occur while loading a fleet report.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading the report file failed.
    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),

    /// The report is not valid JSON or does not match the report shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("Server returned status {0}")]
    Status(u16),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// The background fetch task went away.
    #[error("Fetch task stopped")]
    Disconnected,
}

impl SourceError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Transport failures and 5xx responses are retryable. Client errors and
    /// malformed documents are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::Http(_) | SourceError::Connection(_) | SourceError::Timeout => true,
            SourceError::Status(code) => *code >= 500,
            SourceError::Read(_) | SourceError::Parse(_) | SourceError::Disconnected => false,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_connect() {
            SourceError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            SourceError::Status(status.as_u16())
        } else {
            SourceError::Http(err.to_string())
        }
    }
}
