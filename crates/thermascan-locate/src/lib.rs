//! thermascan-locate - Screenshot partition and crosshair location
//!
//! A TG-series screenshot is a fixed 174x220 layout: an OSD text strip on
//! top and the false-color infrared image below, with a measurement
//! crosshair drawn over the infrared region. The [`Locator`] cuts the
//! screenshot into the two regions, finds the crosshair and identifies
//! the device model from the crosshair's geometric signature.
//!
//! The located geometry drives per-pixel classification
//! ([`Locator::detect`]): every infrared pixel is either image data or
//! part of the crosshair overlay.

mod error;
mod model;
mod scan;

pub use error::{LocateError, LocateResult};
pub use model::{Model, ModelSpec, BORDER_WIDTH};

use log::debug;
use thermascan_core::{Canvas, Color, Rect};

/// Expected screenshot width
pub const SCREENSHOT_WIDTH: u16 = 174;
/// Expected screenshot height
pub const SCREENSHOT_HEIGHT: u16 = 220;

/// The OSD text strip within the screenshot
pub const TEXT_RECT: Rect = Rect::new(2, 1, 170, 23);
/// The infrared image within the screenshot
pub const IR_RECT: Rect = Rect::new(12, 25, 150, 175);

/// Temperature glyph run origin within the text strip (large font)
pub const TEMPERATURE_ORIGIN: (u16, u16) = (0, 0);
/// Number of temperature glyphs
pub const TEMPERATURE_DIGITS: u16 = 6;
/// Emissivity glyph run origin within the text strip (small font)
pub const EMISSIVITY_ORIGIN: (u16, u16) = (110, 3);
/// Number of emissivity glyphs
pub const EMISSIVITY_DIGITS: u16 = 6;

/// Crosshair border overlay color
pub const CROSSHAIR_BORDER: Color = Color::BLACK;
/// Crosshair fill overlay color
pub const CROSSHAIR_FILL: Color = Color::WHITE;

/// Classification of one infrared pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    /// Valid image data
    Image,
    /// Occluded by the crosshair overlay
    Crosshair,
    /// Image data whose color failed the palette lookup (transient state
    /// owned by the thermal pass; the locator never returns it)
    Invalid,
    /// Outside the infrared canvas
    OutOfBounds,
}

/// Locates the crosshair in a device screenshot
///
/// Owns the two screenshot regions until they are moved into the thermal
/// context via [`Locator::into_parts`].
#[derive(Debug)]
pub struct Locator {
    text_canvas: Canvas,
    ir_canvas: Canvas,
    crosshair: Rect,
    aperture: Rect,
    model: Model,
}

/// The components of a consumed locator
#[derive(Debug)]
pub struct LocatorParts {
    /// The OSD text region
    pub text_canvas: Canvas,
    /// The infrared region
    pub ir_canvas: Canvas,
    /// The identified model
    pub model: Model,
    /// Crosshair bounding box, relative to the infrared canvas
    pub crosshair: Rect,
    /// Aperture (spot) rectangle, relative to the infrared canvas
    pub aperture: Rect,
}

impl Locator {
    /// Cut a screenshot into its text and infrared regions.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::ImageShape`] unless the canvas is exactly
    /// 174x220.
    pub fn new(screenshot: &Canvas) -> LocateResult<Self> {
        if screenshot.width() != SCREENSHOT_WIDTH || screenshot.height() != SCREENSHOT_HEIGHT {
            return Err(LocateError::ImageShape {
                expected_w: SCREENSHOT_WIDTH,
                expected_h: SCREENSHOT_HEIGHT,
                actual_w: screenshot.width(),
                actual_h: screenshot.height(),
            });
        }

        let text_canvas = screenshot.copy(TEXT_RECT.x, TEXT_RECT.y, TEXT_RECT.w, TEXT_RECT.h)?;
        let ir_canvas = screenshot.copy(IR_RECT.x, IR_RECT.y, IR_RECT.w, IR_RECT.h)?;

        Ok(Self {
            text_canvas,
            ir_canvas,
            crosshair: Rect::default(),
            aperture: Rect::default(),
            model: Model::Unknown,
        })
    }

    /// Build a locator from pre-cut regions.
    ///
    /// The model starts as [`Model::Unknown`] (every pixel classifies as
    /// image data); run [`process`](Locator::process) to search the
    /// infrared canvas for a crosshair. Intended for synthetic pipelines
    /// and tests; the regions may have any geometry.
    pub fn from_parts(text_canvas: Canvas, ir_canvas: Canvas) -> Self {
        Self {
            text_canvas,
            ir_canvas,
            crosshair: Rect::default(),
            aperture: Rect::default(),
            model: Model::Unknown,
        }
    }

    /// Search the infrared canvas for the crosshair and identify the model.
    ///
    /// With no match the locator stays valid with [`Model::Unknown`]; the
    /// image can still be palette-analyzed. Re-running the search yields
    /// the same geometry.
    pub fn process(&mut self) -> Model {
        for y in 0..self.ir_canvas.height() {
            if !scan::row_qualifies(&self.ir_canvas, y) {
                continue;
            }
            let Some(row_match) = scan::scan_row(&self.ir_canvas, y) else {
                continue;
            };

            let spec = row_match.spec;
            let width = spec.crosshair_width();
            // A cross-section hugging the canvas top cannot belong to a
            // complete crosshair
            let Some(cx) = (row_match.end_x + 1).checked_sub(width) else {
                continue;
            };
            let Some(cy) = y.checked_sub(spec.target_row) else {
                continue;
            };

            self.model = row_match.model;
            self.crosshair = Rect::new(cx, cy, width, spec.crosshair_height);
            self.aperture = Rect::new(
                cx + spec.eye_offset.0,
                cy + spec.eye_offset.1,
                spec.eye_width,
                spec.eye_height,
            );
            debug!(
                "located {} crosshair at ({}, {}), aperture at ({}, {})",
                self.model, cx, cy, self.aperture.x, self.aperture.y
            );
            return self.model;
        }

        debug!("no crosshair found, model unknown");
        self.model = Model::Unknown;
        self.crosshair = Rect::default();
        self.aperture = Rect::default();
        self.model
    }

    /// Classify one infrared pixel.
    ///
    /// With [`Model::Unknown`] every in-bounds pixel is image data;
    /// otherwise a pixel inside the crosshair bounding box is tested
    /// against the model's opaque overlay rectangles.
    pub fn detect(&self, x: u16, y: u16) -> PixelClass {
        if x >= self.ir_canvas.width() || y >= self.ir_canvas.height() {
            return PixelClass::OutOfBounds;
        }
        let Some(spec) = self.model.spec() else {
            return PixelClass::Image;
        };
        if !self.crosshair.contains(x, y) {
            return PixelClass::Image;
        }

        let rx = x - self.crosshair.x;
        let ry = y - self.crosshair.y;
        if spec.overlay.iter().any(|r| r.contains(rx, ry)) {
            PixelClass::Crosshair
        } else {
            PixelClass::Image
        }
    }

    /// Get the OSD text region
    pub fn text_canvas(&self) -> &Canvas {
        &self.text_canvas
    }

    /// Get the infrared region
    pub fn ir_canvas(&self) -> &Canvas {
        &self.ir_canvas
    }

    /// Get the identified model
    pub fn model(&self) -> Model {
        self.model
    }

    /// Get the crosshair bounding box (empty until a crosshair is found)
    pub fn crosshair(&self) -> Rect {
        self.crosshair
    }

    /// Get the aperture rectangle (empty until a crosshair is found)
    pub fn aperture(&self) -> Rect {
        self.aperture
    }

    /// Consume the locator, moving out both canvases and the geometry
    pub fn into_parts(self) -> LocatorParts {
        LocatorParts {
            text_canvas: self.text_canvas,
            ir_canvas: self.ir_canvas,
            model: self.model,
            crosshair: self.crosshair,
            aperture: self.aperture,
        }
    }
}
