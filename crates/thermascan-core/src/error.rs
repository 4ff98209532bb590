//! Error types for thermascan-core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid canvas dimensions
    #[error("invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },

    /// Coordinate outside the canvas
    #[error("point ({x}, {y}) out of bounds for {width}x{height} canvas")]
    OutOfBounds {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },

    /// Rectangle extends past the source canvas
    #[error("region {w}x{h} at ({x}, {y}) exceeds {width}x{height} canvas")]
    RegionOutOfRange {
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        width: u16,
        height: u16,
    },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
