//! Error types for the asset pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplatError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("truncated data: expected {expected} bytes for {rows} rows, found {actual}")]
    TruncatedData {
        rows: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SplatError>;
