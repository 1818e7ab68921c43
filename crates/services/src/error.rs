//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by `HttpExamClient` and other `ExamGateway` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamClientError {
    #[error("invalid exam server url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("exam server returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
