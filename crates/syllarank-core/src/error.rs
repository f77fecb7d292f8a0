//! Error types for Syllarank.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Search index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("Invalid filter request: {0}")]
    InvalidFilter(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
