//! Error types for thermascan-thermal

use thermascan_locate::PixelClass;
use thiserror::Error;

/// Thermal recovery error type
#[derive(Error, Debug)]
pub enum ThermalError {
    /// Text canvas does not have the OSD strip geometry
    #[error("expected a {expected_w}x{expected_h} text strip, got {actual_w}x{actual_h}")]
    TextShape {
        expected_w: u16,
        expected_h: u16,
        actual_w: u16,
        actual_h: u16,
    },

    /// An OSD readout did not parse
    #[error("malformed {field} readout {text:?}")]
    OsdFormat { field: &'static str, text: String },

    /// `process` was called while an intensity image exists
    #[error("intensity image already exists; discard it before reprocessing")]
    IntensityExists,

    /// No intensity image; run `process` first
    #[error("no intensity image; run process first")]
    NoIntensity,

    /// Exact quantization hit a palette entry wider than one intensity
    #[error("exact quantization needs width-1 entries, found width {width} at base {base}")]
    QuantizationWidth { base: u8, width: u8 },

    /// Mask entry has a class that is invalid at this stage
    #[error("corrupt mask: unexpected {class:?} entry at ({x}, {y})")]
    MaskCorrupt { x: u16, y: u16, class: PixelClass },

    /// Interpolation kernel found no valid neighbor
    #[error("no image pixels within the interpolation kernel at ({x}, {y})")]
    EmptyKernel { x: u16, y: u16 },

    /// The image contains no palette-mapped pixels to interpolate from
    #[error("image has no valid palette-mapped pixels")]
    NoImagePixels,

    /// Skip bookkeeping did not balance across the two passes
    #[error("interpolation bookkeeping out of balance")]
    SkipAccounting,

    /// Output canvas does not match the mask geometry
    #[error("canvas {canvas_w}x{canvas_h} does not match {mask_w}x{mask_h} mask")]
    ShapeMismatch {
        canvas_w: u16,
        canvas_h: u16,
        mask_w: u16,
        mask_h: u16,
    },

    /// OCR failed
    #[error("OCR failed")]
    Ocr(#[from] thermascan_ocr::OcrError),

    /// Palette operation failed
    #[error("palette operation failed")]
    Palette(#[from] thermascan_palette::PaletteError),

    /// Canvas operation failed
    #[error("canvas error")]
    Canvas(#[from] thermascan_core::Error),
}

/// Result type alias for thermal operations
pub type ThermalResult<T> = std::result::Result<T, ThermalError>;
