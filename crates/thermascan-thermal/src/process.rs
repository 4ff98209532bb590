//! Two-pass palette inversion
//!
//! Pass 1 inverts every palette-mapped pixel and tallies the intensity
//! statistics; pixels whose color fails the lookup are downgraded to
//! [`PixelClass::Invalid`] and, together with the crosshair pixels, left
//! for pass 2. Pass 2 walks the rows from the first skipped one and fills
//! every outstanding pixel per the interpolation policy. Invalid entries
//! are promoted back to image data as they are filled, so pixels
//! interpolated earlier in the scan feed the kernels of later ones.

use log::debug;
use thermascan_locate::PixelClass;
use thermascan_palette::{determine, PaletteCache, PaletteError};

use crate::error::{ThermalError, ThermalResult};
use crate::intensity::{IntensityImage, IntensityPoint, Interpolation, Quantization};
use crate::Thermal;

/// Running statistics over the palette entry bases seen in pass 1
struct Tally {
    sum: u64,
    count: u64,
    min: u8,
    max: u8,
}

impl Tally {
    fn new() -> Self {
        Self {
            sum: 0,
            count: 0,
            min: u8::MAX,
            max: 0,
        }
    }

    fn add(&mut self, base: u8) {
        self.sum += base as u64;
        self.count += 1;
        self.min = self.min.min(base);
        self.max = self.max.max(base);
    }

    fn mean(&self) -> u8 {
        (self.sum / self.count) as u8
    }
}

impl Thermal {
    /// Invert the rendering palette into a relative intensity image.
    ///
    /// Determines the palette (with an unlimited mismatch budget), then
    /// runs the two inversion passes. On success the context holds the
    /// intensity image and statistics; every invalid mask entry has been
    /// promoted back to image data.
    ///
    /// # Errors
    ///
    /// [`ThermalError::IntensityExists`] if an intensity image is already
    /// present (discard it first), [`ThermalError::Palette`] if no palette
    /// can be determined, [`ThermalError::QuantizationWidth`] for exact
    /// quantization on a wider palette, [`ThermalError::NoImagePixels`] if
    /// not a single pixel could be palette-mapped,
    /// [`ThermalError::EmptyKernel`] if a square kernel finds no valid
    /// neighbor.
    pub fn process(
        &mut self,
        interpolation: Interpolation,
        quantization: Quantization,
    ) -> ThermalResult<()> {
        if self.intensity.is_some() {
            return Err(ThermalError::IntensityExists);
        }

        let palette = determine(&self.visible_image, None)?;
        debug!("determined palette: {palette}");
        self.palette = palette;

        let width = self.visible_image.width();
        let height = self.visible_image.height();
        let mut image = IntensityImage::new(width, height)?;
        image.set_mode(quantization);

        let mut cache = PaletteCache::new();
        let mut tally = Tally::new();
        let mut skipped: u32 = 0;
        let mut start_y: Option<u16> = None;

        // Pass 1: invert every palette-mapped pixel
        for y in 0..height {
            for x in 0..width {
                match self.mask.class(x, y) {
                    PixelClass::Image => {
                        let color = self.visible_image.pixel(x, y);
                        let entry = match cache.find_color(palette, color) {
                            Ok(entry) => entry,
                            Err(PaletteError::ColorNotFound { .. }) => {
                                self.mask.set_class(x, y, PixelClass::Invalid);
                                start_y.get_or_insert(y);
                                skipped += 1;
                                continue;
                            }
                            Err(other) => return Err(other.into()),
                        };

                        tally.add(entry.base);
                        let value = match quantization {
                            Quantization::Exact => {
                                if entry.width != 1 {
                                    return Err(ThermalError::QuantizationWidth {
                                        base: entry.base,
                                        width: entry.width,
                                    });
                                }
                                entry.base
                            }
                            Quantization::Floor => entry.base,
                            Quantization::Ceiling => entry.base + entry.width - 1,
                            Quantization::MedianLow => entry.base + (entry.width - 1) / 2,
                            Quantization::MedianHigh => entry.base + entry.width / 2,
                        };
                        image.set_point(
                            x,
                            y,
                            IntensityPoint {
                                value,
                                uncertainty: entry.width,
                            },
                        );
                    }
                    PixelClass::Crosshair => {
                        start_y.get_or_insert(y);
                        if interpolation == Interpolation::Zero {
                            image.set_point(
                                x,
                                y,
                                IntensityPoint {
                                    value: 0,
                                    uncertainty: 1,
                                },
                            );
                        } else {
                            skipped += 1;
                        }
                    }
                    class => {
                        return Err(ThermalError::MaskCorrupt { x, y, class });
                    }
                }
            }
        }

        if tally.min > tally.max {
            return Err(ThermalError::NoImagePixels);
        }

        if skipped == 0 {
            self.finish(image, &tally);
            return Ok(());
        }

        let Some(start_y) = start_y else {
            return Err(ThermalError::SkipAccounting);
        };
        if tally.count == 0 {
            return Err(ThermalError::NoImagePixels);
        }
        debug!(
            "pass 2: {} skipped pixels from row {}, {:?}",
            skipped, start_y, interpolation
        );
        let mean = tally.mean();

        // Pass 2: fill the outstanding pixels. A filled pixel is promoted
        // to image data after its own kernel ran, so it feeds the kernels
        // of the pixels that follow in scan order but never its own.
        for y in start_y..height {
            for x in 0..width {
                let class = self.mask.class(x, y);
                match class {
                    PixelClass::Image => continue,
                    PixelClass::Invalid => {}
                    PixelClass::Crosshair => {
                        // Under zero interpolation the crosshair was
                        // already written in pass 1
                        if interpolation == Interpolation::Zero {
                            continue;
                        }
                    }
                    class => {
                        return Err(ThermalError::MaskCorrupt { x, y, class });
                    }
                }

                skipped = skipped
                    .checked_sub(1)
                    .ok_or(ThermalError::SkipAccounting)?;

                let value = match interpolation {
                    Interpolation::Zero => 0,
                    Interpolation::Min => tally.min,
                    Interpolation::Max => tally.max,
                    Interpolation::Med => mean,
                    Interpolation::SquareSmall
                    | Interpolation::SquareWeight
                    | Interpolation::SquareLarge => self.kernel_mean(&image, interpolation, x, y)?,
                };
                if class == PixelClass::Invalid {
                    self.mask.set_class(x, y, PixelClass::Image);
                }
                image.set_point(
                    x,
                    y,
                    IntensityPoint {
                        value,
                        uncertainty: 1,
                    },
                );
            }
        }

        if skipped != 0 {
            return Err(ThermalError::SkipAccounting);
        }

        self.finish(image, &tally);
        Ok(())
    }

    fn finish(&mut self, image: IntensityImage, tally: &Tally) {
        self.stats = Some(crate::IntensityStats {
            min: tally.min,
            max: tally.max,
            mean: tally.mean(),
        });
        self.intensity = Some(image);
    }

    /// Mean over the square kernels of the interpolation mode.
    ///
    /// The large mode accumulates the 13x13, 3x3 and 5x5 squares into one
    /// sum, counting the center squares again so they weigh more; the
    /// weighted mode counts the 3x3 square at weight 4 plus the 5x5
    /// square. Neighbors outside the image or not currently classified as
    /// image data are skipped.
    fn kernel_mean(
        &self,
        image: &IntensityImage,
        interpolation: Interpolation,
        x: u16,
        y: u16,
    ) -> ThermalResult<u8> {
        let mut sum: u32 = 0;
        let mut count: u32 = 0;
        let mut accumulate = |reach: i32, weight: u32| {
            for dy in -reach..=reach {
                for dx in -reach..=reach {
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    if nx < 0 || ny < 0 {
                        continue;
                    }
                    let (nx, ny) = (nx as u16, ny as u16);
                    if self.mask.class(nx, ny) != PixelClass::Image {
                        continue;
                    }
                    sum += image.point(nx, ny).value as u32 * weight;
                    count += weight;
                }
            }
        };

        if interpolation == Interpolation::SquareLarge {
            accumulate(6, 1);
        }
        if interpolation != Interpolation::SquareSmall {
            let weight = if interpolation == Interpolation::SquareWeight {
                4
            } else {
                1
            };
            accumulate(1, weight);
        }
        accumulate(2, 1);

        if count == 0 {
            return Err(ThermalError::EmptyKernel { x, y });
        }
        Ok((sum / count) as u8)
    }
}
