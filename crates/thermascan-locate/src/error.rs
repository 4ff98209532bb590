//! Error types for thermascan-locate

use thiserror::Error;

/// Locator error type
#[derive(Error, Debug)]
pub enum LocateError {
    /// Screenshot does not have the fixed device geometry
    #[error("expected a {expected_w}x{expected_h} screenshot, got {actual_w}x{actual_h}")]
    ImageShape {
        expected_w: u16,
        expected_h: u16,
        actual_w: u16,
        actual_h: u16,
    },

    /// Canvas operation failed
    #[error("canvas error")]
    Canvas(#[from] thermascan_core::Error),
}

/// Result type alias for locator operations
pub type LocateResult<T> = std::result::Result<T, LocateError>;
