//! Palette determination
//!
//! Identifies which palette rendered an infrared canvas by tallying, per
//! palette, how many pixels carry a color that palette contains. The
//! crosshair overlay colors (pure black and white) are reserved and
//! skipped.

use log::debug;
use thermascan_core::{Canvas, Color};

use crate::cache::PaletteCache;
use crate::error::{PaletteError, PaletteResult};
use crate::PaletteKind;

/// Determine the palette that rendered `canvas`.
///
/// Every non-black, non-white pixel is looked up in all three palettes
/// (through per-palette caches) and counts for each palette containing its
/// color. A pixel matching no palette consumes one unit of `max_errors`
/// (`None` means unlimited).
///
/// # Errors
///
/// [`PaletteError::TooManyMismatches`] once the error budget is exhausted,
/// [`PaletteError::Ambiguous`] if no palette matched at all or two palettes
/// tie at the maximum.
pub fn determine(canvas: &Canvas, max_errors: Option<u32>) -> PaletteResult<PaletteKind> {
    const PALETTES: usize = PaletteKind::ALL.len();
    let mut counts = [0u32; PALETTES];
    let mut caches: [PaletteCache; PALETTES] = Default::default();
    let mut budget = max_errors;

    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let color = canvas.pixel(x, y);
            if color == Color::BLACK || color == Color::WHITE {
                continue;
            }

            let mut matched = false;
            for (slot, kind) in PaletteKind::ALL.iter().enumerate() {
                if caches[slot].find_color(*kind, color).is_ok() {
                    counts[slot] += 1;
                    matched = true;
                }
            }

            if !matched {
                if let Some(remaining) = budget.as_mut() {
                    *remaining = remaining.saturating_sub(1);
                    if *remaining == 0 {
                        return Err(PaletteError::TooManyMismatches {
                            limit: max_errors.unwrap_or(0),
                        });
                    }
                }
            }
        }
    }

    debug!(
        "palette tallies: iron={} grayscale={} rainbow={}",
        counts[0], counts[1], counts[2]
    );

    let best = counts.iter().copied().max().unwrap_or(0);
    if best == 0 || counts.iter().filter(|&&c| c == best).count() > 1 {
        return Err(PaletteError::Ambiguous);
    }

    let winner = counts
        .iter()
        .position(|&c| c == best)
        .ok_or(PaletteError::Ambiguous)?;
    Ok(PaletteKind::ALL[winner])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Countable colors used by `kind` and by no other palette
    fn exclusive_colors(kind: PaletteKind) -> Vec<Color> {
        kind.entries()
            .iter()
            .map(|e| e.color)
            .filter(|&c| c != Color::BLACK && c != Color::WHITE)
            .filter(|&c| {
                PaletteKind::ALL
                    .iter()
                    .filter(|&&other| other != kind)
                    .all(|other| other.entries().iter().all(|e| e.color != c))
            })
            .collect()
    }

    fn canvas_of(colors: &[Color], width: u16) -> Canvas {
        let height = (colors.len() as u16).div_ceil(width);
        let mut canvas = Canvas::new(width, height).unwrap();
        for (i, &c) in colors.iter().enumerate() {
            canvas.set_pixel(i as u16 % width, i as u16 / width, c);
        }
        canvas
    }

    #[test]
    fn test_determines_each_palette() {
        for kind in PaletteKind::ALL {
            let colors: Vec<Color> = exclusive_colors(kind).into_iter().take(16).collect();
            assert!(colors.len() >= 8, "{kind}: not enough exclusive colors");
            let canvas = canvas_of(&colors, 4);
            assert_eq!(determine(&canvas, None).unwrap(), kind);
        }
    }

    #[test]
    fn test_crosshair_colors_skipped() {
        // A canvas of only overlay colors matches nothing
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.fill(Color::WHITE);
        canvas.set_pixel(0, 0, Color::BLACK);
        assert!(matches!(
            determine(&canvas, None),
            Err(PaletteError::Ambiguous)
        ));
    }

    #[test]
    fn test_tie_is_ambiguous() {
        // Pixels split exactly 50/50 between iron-only and grayscale-only
        let iron: Vec<Color> = exclusive_colors(PaletteKind::Iron)
            .into_iter()
            .take(8)
            .collect();
        let gray: Vec<Color> = exclusive_colors(PaletteKind::Grayscale)
            .into_iter()
            .take(8)
            .collect();
        let mut colors = iron;
        colors.extend(gray);
        let canvas = canvas_of(&colors, 4);
        assert!(matches!(
            determine(&canvas, None),
            Err(PaletteError::Ambiguous)
        ));
    }

    #[test]
    fn test_error_budget() {
        // Near-pure green appears in none of the three ramps
        let stray = Color::from_components(1, 63, 1);
        for kind in PaletteKind::ALL {
            assert!(
                kind.entries().iter().all(|e| e.color != stray),
                "test premise: {kind} must not contain the stray color"
            );
        }

        let mut colors = vec![stray; 3];
        colors.extend(exclusive_colors(PaletteKind::Iron).into_iter().take(5));
        let canvas = canvas_of(&colors, 4);

        // Unlimited budget tolerates the strays
        assert_eq!(determine(&canvas, None).unwrap(), PaletteKind::Iron);
        // A budget of three dies on the third stray
        assert!(matches!(
            determine(&canvas, Some(3)),
            Err(PaletteError::TooManyMismatches { limit: 3 })
        ));
        // A budget of four survives
        assert_eq!(determine(&canvas, Some(4)).unwrap(), PaletteKind::Iron);
    }
}
