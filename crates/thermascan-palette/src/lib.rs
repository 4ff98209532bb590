//! thermascan-palette - False-color palettes of the TG-series cameras
//!
//! The cameras render relative infrared intensity (0..=255) to the display
//! through one of three fixed palettes. A palette is a sorted list of
//! [`PaletteEntry`] values: every intensity `v` with
//! `base <= v < base + width` renders to `color`. The entry ranges are
//! pairwise disjoint and each color appears at most once per palette, so
//! the mapping can be inverted exactly up to the entry width.
//!
//! Lookups go through a small recency cache ([`PaletteCache`]); palette
//! identification for a whole canvas lives in [`determine`].

mod cache;
mod determine;
mod error;
mod grayscale;
mod iron;
mod rainbow;

pub use cache::{PaletteCache, CACHE_SIZE};
pub use determine::determine;
pub use error::{PaletteError, PaletteResult};

use thermascan_core::Color;

/// One palette mapping entry: intensities `base..base + width` render to
/// `color`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaletteEntry {
    /// First intensity covered by this entry
    pub base: u8,
    /// Number of consecutive intensities collapsing to the same color
    pub width: u8,
    /// The rendered RGB 5:6:5 color
    pub color: Color,
}

impl PaletteEntry {
    /// Create a palette entry
    pub const fn new(base: u8, width: u8, color: Color) -> Self {
        Self { base, width, color }
    }

    /// Check whether this entry covers the given intensity
    #[inline]
    pub fn covers(&self, value: u8) -> bool {
        self.base <= value && (value as u16) < self.base as u16 + self.width as u16
    }
}

/// Identifies one of the camera palettes
///
/// The indices are stable and match the on-wire numbering used by the
/// command-line driver (0 is reserved for an undetermined palette).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PaletteKind {
    /// Palette not (yet) determined
    Unknown = 0,
    /// Ironbow ramp, 128 entries of width 2
    Iron = 1,
    /// Linear gray ramp, 64 entries of width 4
    Grayscale = 2,
    /// Jet-style rainbow ramp, 256 entries of width 1
    Rainbow = 3,
}

impl PaletteKind {
    /// The three concrete palettes, in index order
    pub const ALL: [PaletteKind; 3] = [
        PaletteKind::Iron,
        PaletteKind::Grayscale,
        PaletteKind::Rainbow,
    ];

    /// Get the palette table, empty for [`PaletteKind::Unknown`]
    pub fn entries(self) -> &'static [PaletteEntry] {
        match self {
            PaletteKind::Unknown => &[],
            PaletteKind::Iron => &iron::IRON,
            PaletteKind::Grayscale => &grayscale::GRAYSCALE,
            PaletteKind::Rainbow => &rainbow::RAINBOW,
        }
    }

    /// Get the stable palette index
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Look a palette up by its stable index
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PaletteKind::Unknown),
            1 => Some(PaletteKind::Iron),
            2 => Some(PaletteKind::Grayscale),
            3 => Some(PaletteKind::Rainbow),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PaletteKind::Unknown => "unknown",
            PaletteKind::Iron => "iron",
            PaletteKind::Grayscale => "grayscale",
            PaletteKind::Rainbow => "rainbow",
        };
        f.write_str(name)
    }
}
