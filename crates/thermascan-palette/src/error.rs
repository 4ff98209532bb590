//! Error types for thermascan-palette

use thermascan_core::Color;
use thiserror::Error;

use crate::PaletteKind;

/// Palette error type
#[derive(Error, Debug)]
pub enum PaletteError {
    /// Lookup against a palette with no table
    #[error("palette {0} has no entries")]
    EmptyPalette(PaletteKind),

    /// Color is not used by the palette
    #[error("color {color:#06x} not in the {kind} palette", color = .color.raw())]
    ColorNotFound { kind: PaletteKind, color: Color },

    /// Intensity is not covered by any palette entry
    #[error("intensity {value} not covered by the {kind} palette")]
    ValueNotFound { kind: PaletteKind, value: u8 },

    /// Too many pixels matched no palette during determination
    #[error("palette determination gave up after {limit} unmatched pixels")]
    TooManyMismatches { limit: u32 },

    /// No palette stood out during determination
    #[error("ambiguous palette: no unique best match")]
    Ambiguous,
}

/// Result type alias for palette operations
pub type PaletteResult<T> = std::result::Result<T, PaletteError>;
