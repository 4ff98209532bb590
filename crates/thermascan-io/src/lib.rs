//! thermascan-io - Bitmap I/O
//!
//! Reads and writes the BMP files the cameras produce and the tools
//! consume. The only supported container is uncompressed BMP at 16 bpp
//! (the device's native RGB 5:6:5 bitfield format), 24 bpp and 32 bpp.

mod bmp;
mod error;

pub use bmp::{BitDepth, Bitmap};
pub use error::{IoError, IoResult};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read a bitmap from a file path
pub fn read_bitmap<P: AsRef<Path>>(path: P) -> IoResult<Bitmap> {
    let file = File::open(path)?;
    Bitmap::load(BufReader::new(file))
}

/// Write a bitmap to a file path
pub fn write_bitmap<P: AsRef<Path>>(bitmap: &Bitmap, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    bitmap.store(BufWriter::new(file))
}
