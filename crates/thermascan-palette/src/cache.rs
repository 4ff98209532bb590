//! Palette lookup cache
//!
//! Palette scans are linear, and neighboring pixels of an infrared image
//! overwhelmingly share a handful of colors. A [`PaletteCache`] keeps the
//! last few matched entries in front of the table scan.
//!
//! Replacement is strict round-robin through a write cursor once the buffer
//! is full; cache hits do not reorder the buffer. (A recency-ordered LRU
//! would likely hit more often and is a possible future change, but the
//! round-robin behavior is part of the documented contract.)
//!
//! A cache instance belongs to one palette: looking up a different palette
//! through the same cache returns stale entries. Callers that switch
//! palettes must start from a fresh cache.

use thermascan_core::Color;

use crate::error::{PaletteError, PaletteResult};
use crate::{PaletteEntry, PaletteKind};

/// Number of entries a cache holds
pub const CACHE_SIZE: usize = 4;

/// Recency buffer in front of the palette table scan
#[derive(Debug, Clone, Default)]
pub struct PaletteCache {
    entries: [PaletteEntry; CACHE_SIZE],
    len: u8,
    cursor: u8,
}

impl PaletteCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the palette entry rendering `color`.
    ///
    /// Scans the cache first, then the palette table; a table hit is
    /// written into the cache at the cursor.
    ///
    /// # Errors
    ///
    /// [`PaletteError::EmptyPalette`] for a palette without a table,
    /// [`PaletteError::ColorNotFound`] if no entry uses the color.
    pub fn find_color(&mut self, kind: PaletteKind, color: Color) -> PaletteResult<PaletteEntry> {
        let palette = non_empty(kind)?;

        for entry in &self.entries[..self.len as usize] {
            if entry.color == color {
                return Ok(*entry);
            }
        }

        for entry in palette {
            if entry.color == color {
                self.remember(*entry);
                return Ok(*entry);
            }
        }

        Err(PaletteError::ColorNotFound { kind, color })
    }

    /// Find the palette entry covering the intensity `value`.
    ///
    /// Same cache semantics as [`find_color`](PaletteCache::find_color),
    /// matching on `base <= value < base + width`.
    ///
    /// # Errors
    ///
    /// [`PaletteError::EmptyPalette`] for a palette without a table,
    /// [`PaletteError::ValueNotFound`] if no entry covers the intensity.
    pub fn find_value(&mut self, kind: PaletteKind, value: u8) -> PaletteResult<PaletteEntry> {
        let palette = non_empty(kind)?;

        for entry in &self.entries[..self.len as usize] {
            if entry.covers(value) {
                return Ok(*entry);
            }
        }

        for entry in palette {
            if entry.covers(value) {
                self.remember(*entry);
                return Ok(*entry);
            }
        }

        Err(PaletteError::ValueNotFound { kind, value })
    }

    /// Insert a freshly matched entry.
    ///
    /// Appends while the buffer is filling; once full, overwrites at the
    /// cursor and advances it modulo the buffer length.
    fn remember(&mut self, entry: PaletteEntry) {
        if (self.len as usize) < CACHE_SIZE {
            self.cursor = 0;
            self.entries[self.len as usize] = entry;
            self.len += 1;
            return;
        }

        self.entries[self.cursor as usize] = entry;
        self.cursor += 1;
        if self.cursor >= self.len {
            self.cursor = 0;
        }
    }
}

fn non_empty(kind: PaletteKind) -> PaletteResult<&'static [PaletteEntry]> {
    let palette = kind.entries();
    if palette.is_empty() {
        return Err(PaletteError::EmptyPalette(kind));
    }
    Ok(palette)
}
