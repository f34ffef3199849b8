//! Common error types for the series service

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for series operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the series crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error on a specific path
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data file is not a valid JSON array of records
    #[error("Malformed data file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Metadata enrichment lookup failed
    #[error("Enrichment error: {0}")]
    Enrichment(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
