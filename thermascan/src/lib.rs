//! Thermascan - thermal image recovery from camera screenshots
//!
//! The handheld TG-series infrared cameras save screenshots instead of
//! radiometric data: a fixed 174x220 bitmap holding an OSD text strip, a
//! false-color infrared image and a crosshair overlay. This workspace
//! reverse-engineers such screenshots back into semantic thermal data:
//!
//! 1. partition the screenshot and locate the crosshair
//!    ([`Locator`]), identifying the device model from the crosshair's
//!    geometric signature
//! 2. read the spot temperature and emissivity off the OSD strip by
//!    signature OCR
//! 3. determine the rendering palette and invert it into a relative
//!    intensity image, repairing the crosshair-occluded pixels by
//!    interpolation ([`Thermal`])
//! 4. re-render the intensities with any palette, optionally restamping
//!    a crosshair
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use thermascan::{Interpolation, Locator, PaletteKind, Quantization, Thermal};
//!
//! let bitmap = thermascan::read_bitmap("screenshot.bmp")?;
//! let canvas = bitmap.to_canvas(0, 0, bitmap.width(), bitmap.height())?;
//!
//! let mut locator = Locator::new(&canvas)?;
//! locator.process();
//!
//! let mut thermal = Thermal::new(locator);
//! thermal.ocr()?;
//! thermal.process(Interpolation::SquareWeight, Quantization::MedianLow)?;
//! let rendered = thermal.export(PaletteKind::Rainbow)?;
//! # Ok(())
//! # }
//! ```

pub use thermascan_core::{Canvas, Color, Rect};
pub use thermascan_io::{read_bitmap, write_bitmap, BitDepth, Bitmap, IoError, IoResult};
pub use thermascan_locate::{
    LocateError, LocateResult, Locator, Model, PixelClass, CROSSHAIR_BORDER, CROSSHAIR_FILL,
    IR_RECT, SCREENSHOT_HEIGHT, SCREENSHOT_WIDTH, TEXT_RECT,
};
pub use thermascan_ocr::{GlyphFont, OcrError, OcrResult, LARGE, SMALL};
pub use thermascan_palette::{
    determine, PaletteCache, PaletteEntry, PaletteError, PaletteKind, PaletteResult,
};
pub use thermascan_thermal::{
    IntensityImage, IntensityPoint, IntensityStats, Interpolation, Mask, Quantization, Thermal,
    ThermalError, ThermalResult,
};
