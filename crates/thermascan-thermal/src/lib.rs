//! thermascan-thermal - The thermal recovery core
//!
//! Composes the locator, OCR and palette subsystems into the recovery
//! pipeline: a [`Thermal`] context takes ownership of the two screenshot
//! regions, classifies every infrared pixel against the crosshair
//! geometry, reads the OSD values, inverts the rendering palette into a
//! relative [`IntensityImage`] and re-renders it with any palette.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use thermascan_locate::Locator;
//! use thermascan_palette::PaletteKind;
//! use thermascan_thermal::{Interpolation, Quantization, Thermal};
//!
//! # let screenshot = thermascan_core::Canvas::new(174, 220)?;
//! let mut locator = Locator::new(&screenshot)?;
//! locator.process();
//!
//! let mut thermal = Thermal::new(locator);
//! thermal.ocr()?;
//! thermal.process(Interpolation::SquareWeight, Quantization::MedianLow)?;
//! let rendered = thermal.export(PaletteKind::Iron)?;
//! # Ok(())
//! # }
//! ```

mod crosshair;
mod error;
mod intensity;
mod mask;
mod osd;
mod process;

pub use error::{ThermalError, ThermalResult};
pub use intensity::{IntensityImage, IntensityPoint, Interpolation, Quantization};
pub use mask::Mask;
pub use osd::{parse_emissivity, parse_temperature};

use log::debug;
use thermascan_core::{Canvas, Rect};
use thermascan_locate::{
    Locator, Model, EMISSIVITY_DIGITS, EMISSIVITY_ORIGIN, TEMPERATURE_DIGITS, TEMPERATURE_ORIGIN,
    TEXT_RECT,
};
use thermascan_ocr::{LARGE, SMALL};
use thermascan_palette::{PaletteCache, PaletteKind};

/// Intensity statistics gathered during [`Thermal::process`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityStats {
    /// Lowest entry base observed
    pub min: u8,
    /// Highest entry base observed
    pub max: u8,
    /// Mean entry base, rounded down
    pub mean: u8,
}

/// The thermal recovery context
///
/// Created from a processed [`Locator`], which it consumes: the text and
/// infrared canvases move into the context.
#[derive(Debug)]
pub struct Thermal {
    visible_image: Canvas,
    text_image: Canvas,
    intensity: Option<IntensityImage>,
    mask: Mask,
    palette: PaletteKind,
    temperature_spot: Option<i16>,
    emissivity: Option<u8>,
    model: Model,
    spot: Rect,
    stats: Option<IntensityStats>,
}

impl Thermal {
    /// Create a thermal context from a locator, consuming it.
    ///
    /// Classifies every infrared pixel into the mask before the locator's
    /// canvases are moved out.
    pub fn new(locator: Locator) -> Self {
        let mask = Mask::from_locator(&locator);
        let parts = locator.into_parts();
        Self {
            visible_image: parts.ir_canvas,
            text_image: parts.text_canvas,
            intensity: None,
            mask,
            palette: PaletteKind::Unknown,
            temperature_spot: None,
            emissivity: None,
            model: parts.model,
            spot: parts.aperture,
            stats: None,
        }
    }

    /// Read the OSD values from the text canvas.
    ///
    /// Recognizes the temperature (6 large glyphs at the strip origin) and
    /// the emissivity (6 small glyphs at the emissivity window) and parses
    /// both readouts.
    ///
    /// # Errors
    ///
    /// [`ThermalError::TextShape`] if the text canvas does not have the
    /// OSD strip geometry, [`ThermalError::Ocr`] on unrecognized glyphs,
    /// [`ThermalError::OsdFormat`] on malformed readouts.
    pub fn ocr(&mut self) -> ThermalResult<()> {
        if self.text_image.width() != TEXT_RECT.w || self.text_image.height() != TEXT_RECT.h {
            return Err(ThermalError::TextShape {
                expected_w: TEXT_RECT.w,
                expected_h: TEXT_RECT.h,
                actual_w: self.text_image.width(),
                actual_h: self.text_image.height(),
            });
        }

        let temperature = LARGE.read_string(
            &self.text_image,
            TEMPERATURE_ORIGIN.0,
            TEMPERATURE_ORIGIN.1,
            0,
            TEMPERATURE_DIGITS,
            0,
        )?;
        let emissivity = SMALL.read_string(
            &self.text_image,
            EMISSIVITY_ORIGIN.0,
            EMISSIVITY_ORIGIN.1,
            0,
            EMISSIVITY_DIGITS,
            0,
        )?;

        let temperature_spot = osd::parse_temperature(&temperature)?;
        let emissivity_percent = osd::parse_emissivity(&emissivity)?;
        debug!(
            "OSD readouts: {temperature:?} -> {temperature_spot} tenths degC, \
             {emissivity:?} -> {emissivity_percent}%"
        );
        self.temperature_spot = Some(temperature_spot);
        self.emissivity = Some(emissivity_percent);
        Ok(())
    }

    /// Render the recovered intensity image with a palette.
    ///
    /// # Errors
    ///
    /// [`ThermalError::NoIntensity`] before a successful
    /// [`process`](Thermal::process), [`ThermalError::Palette`] for a
    /// palette without a table (every concrete palette covers the whole
    /// intensity range).
    pub fn export(&self, kind: PaletteKind) -> ThermalResult<Canvas> {
        let image = self.intensity.as_ref().ok_or(ThermalError::NoIntensity)?;

        let mut canvas = Canvas::new(image.width(), image.height())?;
        let mut cache = PaletteCache::new();
        for y in 0..image.height() {
            for x in 0..image.width() {
                let entry = cache.find_value(kind, image.point(x, y).value)?;
                canvas.set_pixel(x, y, entry.color);
            }
        }
        Ok(canvas)
    }

    /// Get the spot temperature in tenths of a degree Celsius, once
    /// [`ocr`](Thermal::ocr) has run
    pub fn temperature_spot(&self) -> Option<i16> {
        self.temperature_spot
    }

    /// Get the emissivity in percent, once [`ocr`](Thermal::ocr) has run
    pub fn emissivity(&self) -> Option<u8> {
        self.emissivity
    }

    /// Get the device model
    pub fn model(&self) -> Model {
        self.model
    }

    /// Get the aperture (spot) rectangle, relative to the infrared canvas
    pub fn spot(&self) -> Rect {
        self.spot
    }

    /// Get the palette determined by [`process`](Thermal::process)
    pub fn palette(&self) -> PaletteKind {
        self.palette
    }

    /// Get the classification mask
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Get the infrared canvas
    pub fn visible_image(&self) -> &Canvas {
        &self.visible_image
    }

    /// Get the OSD text canvas
    pub fn text_image(&self) -> &Canvas {
        &self.text_image
    }

    /// Get the recovered intensity image, once
    /// [`process`](Thermal::process) has run
    pub fn intensity(&self) -> Option<&IntensityImage> {
        self.intensity.as_ref()
    }

    /// Discard the recovered intensity image so the context can be
    /// processed again
    pub fn discard_intensity(&mut self) -> Option<IntensityImage> {
        self.stats = None;
        self.intensity.take()
    }

    /// Get the intensity statistics of the last
    /// [`process`](Thermal::process) run
    pub fn stats(&self) -> Option<IntensityStats> {
        self.stats
    }
}
