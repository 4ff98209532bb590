//! Windows BMP codec
//!
//! A pure-Rust implementation (no external crate dependency) of the three
//! uncompressed BMP flavors the cameras and tools exchange:
//!
//! - 16 bpp, `BI_BITFIELDS` with the RGB 5:6:5 masks (the device format)
//! - 24 bpp, `BI_RGB`
//! - 32 bpp, `BI_RGB`
//!
//! Pixel rows are kept top-down (negative DIB height); bottom-up files
//! are flipped on load. Rows are padded to 32-bit boundaries.

use std::io::{Read, Write};

use log::debug;
use thermascan_core::{Canvas, Color};

use crate::error::{IoError, IoResult};

/// "BM" signature
const HEADER_MAGIC: u16 = 0x4d42;
/// File header size
const HEADER_SIZE: usize = 14;
/// BITMAPINFOHEADER size
const DIB_SIZE: usize = 40;
/// Size of the three `BI_BITFIELDS` channel masks
const MASK_SIZE: usize = 12;

/// `BI_RGB` compression tag
const COMPRESSION_RGB: u32 = 0;
/// `BI_BITFIELDS` compression tag
const COMPRESSION_BITFIELDS: u32 = 3;

/// RGB 5:6:5 channel masks
const MASK_RED: u32 = 0xf800;
const MASK_GREEN: u32 = 0x07e0;
const MASK_BLUE: u32 = 0x001f;

/// Pixel-count ceiling guarding against malformed headers
const MAX_PIXELS: u32 = 1 << 24;

/// Supported pixel depths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    /// RGB 5:6:5 with bitfield masks
    Bpp16,
    /// 8:8:8, blue first
    Bpp24,
    /// 8:8:8:8, blue first
    Bpp32,
}

impl BitDepth {
    /// Bits per pixel
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Bpp16 => 16,
            BitDepth::Bpp24 => 24,
            BitDepth::Bpp32 => 32,
        }
    }

    fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    fn payload_offset(self) -> u32 {
        match self {
            BitDepth::Bpp16 => (HEADER_SIZE + DIB_SIZE + MASK_SIZE) as u32,
            _ => (HEADER_SIZE + DIB_SIZE) as u32,
        }
    }

    fn compression(self) -> u32 {
        match self {
            BitDepth::Bpp16 => COMPRESSION_BITFIELDS,
            _ => COMPRESSION_RGB,
        }
    }
}

/// An in-memory bitmap: dimensions, depth and top-down pixel rows
#[derive(Debug, Clone)]
pub struct Bitmap {
    width: u16,
    height: u16,
    depth: BitDepth,
    stride: usize,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a zero-filled bitmap.
    ///
    /// # Errors
    ///
    /// Rejects empty dimensions and images past the pixel-count ceiling.
    pub fn new(width: u16, height: u16, depth: BitDepth) -> IoResult<Self> {
        if width == 0 || height == 0 {
            return Err(thermascan_core::Error::InvalidDimensions { width, height }.into());
        }
        if width as u32 * height as u32 > MAX_PIXELS {
            return Err(IoError::InvalidData(format!(
                "{width}x{height} exceeds the pixel ceiling"
            )));
        }

        let stride = row_stride(width, depth);
        Ok(Self {
            width,
            height,
            depth,
            stride,
            pixels: vec![0; stride * height as usize],
        })
    }

    /// Get the width in pixels
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get the height in pixels
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get the pixel depth
    #[inline]
    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Load a bitmap from a reader.
    ///
    /// # Errors
    ///
    /// [`IoError::Io`] on short reads, [`IoError::InvalidData`] on a
    /// malformed header, [`IoError::UnsupportedFormat`] for depths or
    /// compression tags outside the three supported flavors.
    pub fn load<R: Read>(mut reader: R) -> IoResult<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        if data.len() < HEADER_SIZE + DIB_SIZE {
            return Err(IoError::InvalidData("file shorter than its headers".into()));
        }

        // File header
        let magic = read_u16(&data, 0);
        let reserved = read_u32(&data, 6);
        let payload_offset = read_u32(&data, 10) as usize;
        if magic != HEADER_MAGIC || reserved != 0 {
            return Err(IoError::InvalidData("bad signature".into()));
        }

        // BITMAPINFOHEADER
        let dib_size = read_u32(&data, HEADER_SIZE) as usize;
        let width = read_i32(&data, HEADER_SIZE + 4);
        let raw_height = read_i32(&data, HEADER_SIZE + 8);
        let planes = read_u16(&data, HEADER_SIZE + 12);
        let bit_count = read_u16(&data, HEADER_SIZE + 14);
        let compression = read_u32(&data, HEADER_SIZE + 16);

        if dib_size != DIB_SIZE || planes != 1 {
            return Err(IoError::InvalidData("unexpected DIB header".into()));
        }
        if width <= 0 || raw_height == 0 || width > u16::MAX as i32 {
            return Err(IoError::InvalidData("bad dimensions".into()));
        }
        let height_abs = raw_height.unsigned_abs();
        if height_abs > u16::MAX as u32 || width as u32 * height_abs > MAX_PIXELS {
            return Err(IoError::InvalidData("bad dimensions".into()));
        }

        let depth = match (bit_count, compression, payload_offset) {
            (16, COMPRESSION_BITFIELDS, 0x42) => {
                // Verify the 5:6:5 masks
                if data.len() < HEADER_SIZE + DIB_SIZE + MASK_SIZE {
                    return Err(IoError::InvalidData("missing bitfield masks".into()));
                }
                let red = read_u32(&data, HEADER_SIZE + DIB_SIZE);
                let green = read_u32(&data, HEADER_SIZE + DIB_SIZE + 4);
                let blue = read_u32(&data, HEADER_SIZE + DIB_SIZE + 8);
                if (red, green, blue) != (MASK_RED, MASK_GREEN, MASK_BLUE) {
                    return Err(IoError::UnsupportedFormat(format!(
                        "bitfield masks {red:#x}/{green:#x}/{blue:#x}"
                    )));
                }
                BitDepth::Bpp16
            }
            (24, COMPRESSION_RGB, 0x36) => BitDepth::Bpp24,
            (32, COMPRESSION_RGB, 0x36) => BitDepth::Bpp32,
            _ => {
                return Err(IoError::UnsupportedFormat(format!(
                    "{bit_count} bpp with compression {compression}"
                )))
            }
        };

        let width = width as u16;
        let height = height_abs as u16;
        let stride = row_stride(width, depth);
        let pixels_size = stride * height as usize;
        let payload = data
            .get(payload_offset..payload_offset + pixels_size)
            .ok_or_else(|| IoError::InvalidData("truncated pixel data".into()))?;

        // Top-down is canonical; flip bottom-up files on the way in
        let mut pixels = Vec::with_capacity(pixels_size);
        if raw_height > 0 {
            for row in payload.chunks_exact(stride).rev() {
                pixels.extend_from_slice(row);
            }
        } else {
            pixels.extend_from_slice(payload);
        }

        debug!(
            "loaded {}x{} bitmap at {} bpp{}",
            width,
            height,
            bit_count,
            if raw_height > 0 { " (flipped)" } else { "" }
        );

        Ok(Self {
            width,
            height,
            depth,
            stride,
            pixels,
        })
    }

    /// Store the bitmap to a writer, always in top-down form.
    pub fn store<W: Write>(&self, mut writer: W) -> IoResult<()> {
        let mask_size = match self.depth {
            BitDepth::Bpp16 => MASK_SIZE,
            _ => 0,
        };
        let file_size = (HEADER_SIZE + DIB_SIZE + mask_size + self.pixels.len()) as u32;

        let mut out = Vec::with_capacity(file_size as usize);
        // File header
        push_u16(&mut out, HEADER_MAGIC);
        push_u32(&mut out, file_size);
        push_u32(&mut out, 0);
        push_u32(&mut out, self.depth.payload_offset());
        // BITMAPINFOHEADER, negative height marking top-down rows
        push_u32(&mut out, DIB_SIZE as u32);
        push_i32(&mut out, self.width as i32);
        push_i32(&mut out, -(self.height as i32));
        push_u16(&mut out, 1);
        push_u16(&mut out, self.depth.bits());
        push_u32(&mut out, self.depth.compression());
        push_u32(&mut out, self.pixels.len() as u32);
        push_i32(&mut out, 0);
        push_i32(&mut out, 0);
        push_u32(&mut out, 0);
        push_u32(&mut out, 0);
        if self.depth == BitDepth::Bpp16 {
            push_u32(&mut out, MASK_RED);
            push_u32(&mut out, MASK_GREEN);
            push_u32(&mut out, MASK_BLUE);
        }
        out.extend_from_slice(&self.pixels);

        writer.write_all(&out)?;
        Ok(())
    }

    /// Decode a rectangular region into an RGB 5:6:5 canvas.
    ///
    /// 24 and 32-bpp pixels are truncated to 5:6:5.
    ///
    /// # Errors
    ///
    /// Returns a region error if the rectangle exceeds the bitmap.
    pub fn to_canvas(&self, x: u16, y: u16, w: u16, h: u16) -> IoResult<Canvas> {
        if w == 0
            || h == 0
            || x as u32 + w as u32 > self.width as u32
            || y as u32 + h as u32 > self.height as u32
        {
            return Err(thermascan_core::Error::RegionOutOfRange {
                x,
                y,
                w,
                h,
                width: self.width,
                height: self.height,
            }
            .into());
        }

        let mut canvas = Canvas::new(w, h)?;
        for row in 0..h {
            for col in 0..w {
                let offset =
                    (y + row) as usize * self.stride + (x + col) as usize * self.depth.bytes();
                let color = match self.depth {
                    BitDepth::Bpp16 => Color::from_raw(read_u16(&self.pixels, offset)),
                    BitDepth::Bpp24 | BitDepth::Bpp32 => {
                        // Stored blue first
                        let b = self.pixels[offset];
                        let g = self.pixels[offset + 1];
                        let r = self.pixels[offset + 2];
                        Color::from_rgb888(r, g, b)
                    }
                };
                canvas.set_pixel(col, row, color);
            }
        }
        Ok(canvas)
    }

    /// Encode a canvas into the pixel data at (`x`, `y`).
    ///
    /// 5:6:5 colors are expanded to 8:8:8 for the 24 and 32-bpp formats.
    ///
    /// # Errors
    ///
    /// Returns a region error if the canvas does not fit at the offset.
    pub fn blit_canvas(&mut self, canvas: &Canvas, x: u16, y: u16) -> IoResult<()> {
        if x as u32 + canvas.width() as u32 > self.width as u32
            || y as u32 + canvas.height() as u32 > self.height as u32
        {
            return Err(thermascan_core::Error::RegionOutOfRange {
                x,
                y,
                w: canvas.width(),
                h: canvas.height(),
                width: self.width,
                height: self.height,
            }
            .into());
        }

        for row in 0..canvas.height() {
            for col in 0..canvas.width() {
                let color = canvas.pixel(col, row);
                let offset =
                    (y + row) as usize * self.stride + (x + col) as usize * self.depth.bytes();
                match self.depth {
                    BitDepth::Bpp16 => {
                        self.pixels[offset..offset + 2].copy_from_slice(&color.raw().to_le_bytes());
                    }
                    BitDepth::Bpp24 => {
                        let (r, g, b) = color.to_rgb888();
                        self.pixels[offset] = b;
                        self.pixels[offset + 1] = g;
                        self.pixels[offset + 2] = r;
                    }
                    BitDepth::Bpp32 => {
                        let (r, g, b) = color.to_rgb888();
                        self.pixels[offset] = b;
                        self.pixels[offset + 1] = g;
                        self.pixels[offset + 2] = r;
                        self.pixels[offset + 3] = 0xff;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Row stride in bytes, padded to a 32-bit boundary
fn row_stride(width: u16, depth: BitDepth) -> usize {
    ((width as usize * depth.bits() as usize + 31) & !31) >> 3
}

fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn read_i32(data: &[u8], offset: usize) -> i32 {
    read_u32(data, offset) as i32
}

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_i32(out: &mut Vec<u8>, value: i32) {
    push_u32(out, value as u32);
}
