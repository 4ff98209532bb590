//! Crosshair restamping
//!
//! Draws a recolored crosshair onto an exported canvas using the
//! classification mask as the stencil. Two passes share a three-state
//! machine over {idle, border, fill}: the horizontal pass paints the left
//! border, the fill interior and a right border cap on every crosshair
//! run; the vertical pass only paints the top border and bottom cap of
//! each column run, the interior being already filled.

use thermascan_core::{Canvas, Color};
use thermascan_locate::PixelClass;

use crate::error::{ThermalError, ThermalResult};
use crate::Thermal;

/// Run state of the stamping machines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StampState {
    Idle,
    Border,
    Fill,
}

impl Thermal {
    /// Stamp a crosshair in the given colors onto `canvas`.
    ///
    /// The canvas must match the mask geometry; with no crosshair in the
    /// mask (unknown model) the canvas is left untouched.
    ///
    /// # Errors
    ///
    /// [`ThermalError::ShapeMismatch`] on geometry mismatch,
    /// [`ThermalError::MaskCorrupt`] if the mask still carries invalid
    /// entries (run [`process`](Thermal::process) to completion first).
    pub fn stamp_crosshair(
        &self,
        border: Color,
        fill: Color,
        canvas: &mut Canvas,
    ) -> ThermalResult<()> {
        if canvas.width() != self.mask.width() || canvas.height() != self.mask.height() {
            return Err(ThermalError::ShapeMismatch {
                canvas_w: canvas.width(),
                canvas_h: canvas.height(),
                mask_w: self.mask.width(),
                mask_h: self.mask.height(),
            });
        }

        // Horizontal pass: borders and fill
        for y in 0..self.mask.height() {
            let mut state = StampState::Idle;
            let mut run = 0u16;
            for x in 0..self.mask.width() {
                match self.mask.class(x, y) {
                    PixelClass::Image => {
                        if state == StampState::Fill && run > 1 {
                            // Cap the right edge of the run behind us
                            canvas.set_pixel(x - 1, y, border);
                        }
                        state = StampState::Idle;
                        run = 0;
                    }
                    PixelClass::Crosshair => match state {
                        StampState::Border | StampState::Fill => {
                            state = StampState::Fill;
                            canvas.set_pixel(x, y, fill);
                            run += 1;
                        }
                        StampState::Idle => {
                            canvas.set_pixel(x, y, border);
                            state = StampState::Border;
                            run += 1;
                        }
                    },
                    class => return Err(ThermalError::MaskCorrupt { x, y, class }),
                }
            }
        }

        // Vertical pass: top borders and bottom caps only
        for x in 0..self.mask.width() {
            let mut state = StampState::Idle;
            let mut run = 0u16;
            for y in 0..self.mask.height() {
                match self.mask.class(x, y) {
                    PixelClass::Image => {
                        if state == StampState::Fill && run > 1 {
                            canvas.set_pixel(x, y - 1, border);
                        }
                        state = StampState::Idle;
                        run = 0;
                    }
                    PixelClass::Crosshair => match state {
                        StampState::Border | StampState::Fill => {
                            state = StampState::Fill;
                            run += 1;
                        }
                        StampState::Idle => {
                            canvas.set_pixel(x, y, border);
                            state = StampState::Border;
                            run += 1;
                        }
                    },
                    class => return Err(ThermalError::MaskCorrupt { x, y, class }),
                }
            }
        }

        Ok(())
    }
}
