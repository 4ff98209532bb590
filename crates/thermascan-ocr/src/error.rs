//! Error types for thermascan-ocr

use thiserror::Error;

/// OCR error type
#[derive(Error, Debug)]
pub enum OcrError {
    /// Glyph box does not fit the canvas at the given origin
    #[error("glyph box at ({x}, {y}) exceeds {width}x{height} canvas")]
    GlyphOutOfRange {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },

    /// Glyph run does not fit the canvas
    #[error("{length}-glyph run at ({x}, {y}) exceeds {width}x{height} canvas")]
    RunOutOfRange {
        x: u16,
        y: u16,
        length: u16,
        width: u16,
        height: u16,
    },

    /// Zero-length glyph run
    #[error("glyph run is empty")]
    EmptyRun,

    /// Sampled signature matches no known glyph
    #[error("unrecognized glyph signature {signature:#04x}")]
    UnknownGlyph { signature: u8 },

    /// Character has no glyph in this font
    #[error("font has no glyph for {ch:?}")]
    UnknownChar { ch: char },
}

/// Result type alias for OCR operations
pub type OcrResult<T> = std::result::Result<T, OcrError>;
