//! Error handling for synthetic table generation

use std::io;
use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, TableMillError>;

/// Main error type for TableMill operations
#[derive(Error, Debug)]
pub enum TableMillError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid column or schema configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Sampling failed at draw time
    #[error("Sampling error: {0}")]
    Sampling(String),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(String),
}

impl TableMillError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a sampling error
    pub fn sampling(msg: impl Into<String>) -> Self {
        Self::Sampling(msg.into())
    }
}

impl From<serde_json::Error> for TableMillError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<csv::Error> for TableMillError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}
