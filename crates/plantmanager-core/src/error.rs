//! Error types for plantmanager-core

use thiserror::Error;

/// Result type alias using plantmanager-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in plantmanager-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Saved plant not found
    #[error("Saved plant not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport or decoding failure talking to the catalog API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog API answered with a non-success status
    #[error("Catalog API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
