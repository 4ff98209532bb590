//! I/O error types

use thiserror::Error;

/// Bitmap I/O error type
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed bitmap data
    #[error("invalid bitmap data: {0}")]
    InvalidData(String),

    /// Well-formed bitmap in a format this codec does not handle
    #[error("unsupported bitmap format: {0}")]
    UnsupportedFormat(String),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] thermascan_core::Error),
}

/// Result type for bitmap I/O operations
pub type IoResult<T> = std::result::Result<T, IoError>;
