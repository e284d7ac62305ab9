//! Error types for docpress operations.

use thiserror::Error;

/// Errors that can occur while exporting or publishing a report.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document service error: {0}")]
    Service(String),

    #[error("no document with id: {0}")]
    MissingDocument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
