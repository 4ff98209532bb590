//! thermascan-ocr - Signature OCR for the camera OSD fonts
//!
//! The on-screen display renders two fixed-width white-on-dark fonts: a
//! large 18x23 font for the spot temperature and a small 10x12 font for
//! the emissivity readout. Because the fonts are fixed bitmaps, full
//! template matching is unnecessary: sampling eight well-chosen pixels per
//! glyph box yields an 8-bit signature that is unique per character.
//!
//! [`GlyphFont`] bundles a sample template with its signature table;
//! [`LARGE`] and [`SMALL`] are the two device fonts.

mod error;

pub use error::{OcrError, OcrResult};

use thermascan_core::{Canvas, Color};

/// A fixed-width OSD font recognized by sparse signature sampling
#[derive(Debug, Clone, Copy)]
pub struct GlyphFont {
    /// Glyph box width in pixels
    pub width: u16,
    /// Glyph box height in pixels
    pub height: u16,
    /// Foreground color tested at each sample point
    pub foreground: Color,
    /// The eight sample offsets inside the glyph box; sample `i` sets
    /// signature bit `i`
    pub samples: [(u16, u16); 8],
    /// Signature table, sorted by signature
    table: &'static [(u8, char)],
}

/// The large OSD font (temperature readout), 18x23
pub const LARGE: GlyphFont = GlyphFont {
    width: 18,
    height: 23,
    foreground: Color::WHITE,
    samples: [
        (10, 1),
        (16, 1),
        (3, 4),
        (15, 4),
        (12, 7),
        (8, 11),
        (16, 14),
        (8, 18),
    ],
    table: &[
        (0x00, ' '),
        (0x01, '5'),
        (0x11, '1'),
        (0x20, '-'),
        (0x25, '9'),
        (0x28, 'C'),
        (0x30, 'F'),
        (0x35, '3'),
        (0x41, '0'),
        (0x51, '4'),
        (0x69, '6'),
        (0x7d, '8'),
        (0x80, '.'),
        (0x84, 'L'),
        (0x8d, '2'),
        (0xbb, '7'),
        (0xcc, 'O'),
    ],
};

/// The small OSD font (emissivity readout), 10x12
pub const SMALL: GlyphFont = GlyphFont {
    width: 10,
    height: 12,
    foreground: Color::WHITE,
    samples: [
        (3, 1),
        (5, 2),
        (1, 4),
        (6, 5),
        (4, 8),
        (7, 8),
        (5, 10),
        (7, 10),
    ],
    table: &[
        (0x00, ' '),
        (0x12, ':'),
        (0x19, '7'),
        (0x21, '8'),
        (0x25, '0'),
        (0x29, '5'),
        (0x40, '.'),
        (0x52, '1'),
        (0x6d, '6'),
        (0x89, '3'),
        (0xb2, '4'),
        (0xc0, '9'),
        (0xc9, 'E'),
        (0xd0, '2'),
    ],
};

impl GlyphFont {
    /// Sample the glyph box at (`x`, `y`) into its 8-bit signature.
    ///
    /// # Errors
    ///
    /// Returns [`OcrError::GlyphOutOfRange`] if the box does not fit.
    pub fn signature(&self, canvas: &Canvas, x: u16, y: u16) -> OcrResult<u8> {
        if x as u32 + self.width as u32 > canvas.width() as u32
            || y as u32 + self.height as u32 > canvas.height() as u32
        {
            return Err(OcrError::GlyphOutOfRange {
                x,
                y,
                width: canvas.width(),
                height: canvas.height(),
            });
        }

        let mut signature = 0u8;
        for (bit, &(dx, dy)) in self.samples.iter().enumerate() {
            if canvas.pixel(x + dx, y + dy) == self.foreground {
                signature |= 1 << bit;
            }
        }
        Ok(signature)
    }

    /// Recognize the single glyph at (`x`, `y`).
    ///
    /// # Errors
    ///
    /// [`OcrError::GlyphOutOfRange`] if the box does not fit,
    /// [`OcrError::UnknownGlyph`] if the signature is not in the table.
    pub fn read_char(&self, canvas: &Canvas, x: u16, y: u16) -> OcrResult<char> {
        let signature = self.signature(canvas, x, y)?;
        self.char_of(signature)
            .ok_or(OcrError::UnknownGlyph { signature })
    }

    /// Recognize a run of `length` glyphs starting at (`x`, `y`).
    ///
    /// Glyph `i` is read at `x + i * (width + pitch)`. Unknown glyphs are
    /// dropped from the output while `max_unknown` lasts; the next unknown
    /// glyph after that fails the whole run. The returned string is at
    /// most `length` characters.
    ///
    /// # Errors
    ///
    /// [`OcrError::EmptyRun`] for `length == 0`,
    /// [`OcrError::RunOutOfRange`] if the run does not fit the canvas,
    /// [`OcrError::UnknownGlyph`] once the unknown budget is exhausted.
    pub fn read_string(
        &self,
        canvas: &Canvas,
        x: u16,
        y: u16,
        pitch: u16,
        length: u16,
        mut max_unknown: u16,
    ) -> OcrResult<String> {
        if length == 0 {
            return Err(OcrError::EmptyRun);
        }
        let run_width =
            x as u32 + length as u32 * self.width as u32 + (length as u32 - 1) * pitch as u32;
        if run_width > canvas.width() as u32
            || y as u32 + self.height as u32 > canvas.height() as u32
        {
            return Err(OcrError::RunOutOfRange {
                x,
                y,
                length,
                width: canvas.width(),
                height: canvas.height(),
            });
        }

        let mut result = String::with_capacity(length as usize);
        for i in 0..length {
            let glyph_x = x + i * (self.width + pitch);
            match self.read_char(canvas, glyph_x, y) {
                Ok(ch) => result.push(ch),
                Err(OcrError::UnknownGlyph { signature }) => {
                    if max_unknown == 0 {
                        return Err(OcrError::UnknownGlyph { signature });
                    }
                    max_unknown -= 1;
                }
                Err(other) => return Err(other),
            }
        }
        Ok(result)
    }

    /// Look up the character for a signature
    pub fn char_of(&self, signature: u8) -> Option<char> {
        self.table
            .binary_search_by_key(&signature, |&(s, _)| s)
            .ok()
            .map(|i| self.table[i].1)
    }

    /// Look up the signature that renders to `ch`
    pub fn signature_of(&self, ch: char) -> Option<u8> {
        self.table.iter().find(|&&(_, c)| c == ch).map(|&(s, _)| s)
    }

    /// Characters this font can recognize
    pub fn alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.table.iter().map(|&(_, c)| c)
    }

    /// Paint the glyph for `ch` into a clean box at (`x`, `y`).
    ///
    /// Sets the foreground color exactly at the sample offsets whose
    /// signature bit is set. The painted box OCRs back to `ch`; this is
    /// the glyph source for synthetic screenshots and tests.
    ///
    /// # Errors
    ///
    /// [`OcrError::UnknownChar`] if the font has no glyph for `ch`,
    /// [`OcrError::GlyphOutOfRange`] if the box does not fit.
    pub fn paint_char(&self, canvas: &mut Canvas, x: u16, y: u16, ch: char) -> OcrResult<()> {
        let signature = self.signature_of(ch).ok_or(OcrError::UnknownChar { ch })?;
        if x as u32 + self.width as u32 > canvas.width() as u32
            || y as u32 + self.height as u32 > canvas.height() as u32
        {
            return Err(OcrError::GlyphOutOfRange {
                x,
                y,
                width: canvas.width(),
                height: canvas.height(),
            });
        }

        for (bit, &(dx, dy)) in self.samples.iter().enumerate() {
            if signature & (1 << bit) != 0 {
                canvas.set_pixel(x + dx, y + dy, self.foreground);
            }
        }
        Ok(())
    }

    /// Paint a glyph run the way [`read_string`](GlyphFont::read_string)
    /// reads one.
    pub fn paint_string(
        &self,
        canvas: &mut Canvas,
        x: u16,
        y: u16,
        pitch: u16,
        text: &str,
    ) -> OcrResult<()> {
        for (i, ch) in text.chars().enumerate() {
            self.paint_char(canvas, x + i as u16 * (self.width + pitch), y, ch)?;
        }
        Ok(())
    }
}
