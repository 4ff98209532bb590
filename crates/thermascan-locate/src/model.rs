//! Device models and their crosshair geometry
//!
//! The two camera variants draw the same kind of crosshair at different
//! scales. All geometric knowledge about a model lives here as static
//! data: the scan widths used to identify it and the eight opaque overlay
//! rectangles used to classify pixels.

use thermascan_core::Rect;

/// A camera model identified from its crosshair signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Model {
    /// No crosshair found; the whole infrared canvas is image data
    #[default]
    Unknown,
    /// FLIR TG165 (23x23 crosshair, 5x5 aperture)
    Tg165,
    /// FLIR TG167 (49x47 crosshair, 17x17 aperture)
    Tg167,
}

impl Model {
    /// Get the crosshair geometry, or `None` for [`Model::Unknown`]
    pub fn spec(self) -> Option<&'static ModelSpec> {
        match self {
            Model::Unknown => None,
            Model::Tg165 => Some(&TG165),
            Model::Tg167 => Some(&TG167),
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Model::Unknown => "unknown",
            Model::Tg165 => "TG165",
            Model::Tg167 => "TG167",
        };
        f.write_str(name)
    }
}

/// Accumulated border width across one crosshair cross-section
pub const BORDER_WIDTH: u16 = 4;

/// Static crosshair geometry of one model
#[derive(Debug)]
pub struct ModelSpec {
    /// Width of each of the two fill bars on the eye row
    pub fill_width: u16,
    /// Width of the center aperture (the eye)
    pub eye_width: u16,
    /// Height of the center aperture
    pub eye_height: u16,
    /// Total crosshair height
    pub crosshair_height: u16,
    /// Aperture offset relative to the crosshair origin
    pub eye_offset: (u16, u16),
    /// Row of the eye cross-section relative to the crosshair origin
    pub target_row: u16,
    /// The opaque overlay, relative to the crosshair origin
    pub overlay: [Rect; 8],
}

impl ModelSpec {
    /// Total crosshair width: four border columns, two fill bars, the eye
    pub fn crosshair_width(&self) -> u16 {
        BORDER_WIDTH + 2 * self.fill_width + self.eye_width
    }
}

pub(crate) static TG165: ModelSpec = ModelSpec {
    fill_width: 7,
    eye_width: 5,
    eye_height: 5,
    crosshair_height: 23,
    eye_offset: (9, 9),
    target_row: 11,
    overlay: [
        Rect::new(6, 6, 11, 3),
        Rect::new(0, 10, 6, 3),
        Rect::new(17, 10, 6, 3),
        Rect::new(10, 17, 3, 6),
        Rect::new(6, 9, 3, 8),
        Rect::new(14, 9, 3, 8),
        Rect::new(10, 0, 3, 6),
        Rect::new(9, 14, 5, 3),
    ],
};

pub(crate) static TG167: ModelSpec = ModelSpec {
    fill_width: 14,
    eye_width: 17,
    eye_height: 17,
    crosshair_height: 47,
    eye_offset: (16, 15),
    target_row: 23,
    overlay: [
        Rect::new(13, 12, 23, 3),
        Rect::new(13, 32, 23, 3),
        Rect::new(0, 22, 13, 3),
        Rect::new(36, 22, 13, 3),
        Rect::new(23, 35, 3, 12),
        Rect::new(13, 15, 3, 17),
        Rect::new(33, 15, 3, 17),
        Rect::new(23, 0, 3, 12),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crosshair_widths() {
        assert_eq!(TG165.crosshair_width(), 23);
        assert_eq!(TG167.crosshair_width(), 49);
    }

    #[test]
    fn test_overlay_inside_bounding_box() {
        for spec in [&TG165, &TG167] {
            for rect in &spec.overlay {
                assert!(rect.x + rect.w <= spec.crosshair_width());
                assert!(rect.y + rect.h <= spec.crosshair_height);
            }
        }
    }

    #[test]
    fn test_target_row_crosses_the_eye() {
        for spec in [&TG165, &TG167] {
            let (ex, ey) = spec.eye_offset;
            assert!(spec.target_row >= ey);
            assert!(spec.target_row < ey + spec.eye_height);
            // The eye sits between the two fill bars
            assert_eq!(ex, 2 + spec.fill_width);
        }
    }
}
