//! Crosshair row scanning
//!
//! The crosshair reads, on exactly one row, as the sequence
//! `border, fill{F}, border, eye{E}, border, fill{F}, border` where the
//! border is black, the fill white and the eye any other color, with
//! (F, E) = (7, 5) for the TG165 and (14, 17) for the TG167.
//!
//! Rows pass a cheap color tally first; a qualifying row is swept
//! left-to-right by an eight-state machine that counts border, fill and
//! eye pixels and re-anchors on every unexpected color.

use thermascan_core::Canvas;

use crate::model::{Model, ModelSpec, BORDER_WIDTH, TG165, TG167};
use crate::{CROSSHAIR_BORDER, CROSSHAIR_FILL};

/// A successful pattern match on one row
pub(crate) struct RowMatch {
    /// The identified model
    pub model: Model,
    /// The matched model's geometry
    pub spec: &'static ModelSpec,
    /// Column of the closing border pixel
    pub end_x: u16,
}

/// States of the row sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Start,
    Border1,
    Fill1,
    Border2,
    Eye,
    Border3,
    Fill2,
    Border4,
}

/// Cheap pre-filter: a row can only hold a cross-section if it has at
/// least the border pixels of one crosshair and the fill pixels of the
/// smaller model.
pub(crate) fn row_qualifies(canvas: &Canvas, y: u16) -> bool {
    let min_fill = 2 * TG165.fill_width.min(TG167.fill_width);
    let mut border = 0u16;
    let mut fill = 0u16;

    for x in 0..canvas.width() {
        let pixel = canvas.pixel(x, y);
        if pixel == CROSSHAIR_BORDER {
            border += 1;
        } else if pixel == CROSSHAIR_FILL {
            fill += 1;
        }
        if border >= BORDER_WIDTH && fill >= min_fill {
            return true;
        }
    }
    false
}

/// Sweep one row for the crosshair cross-section. The first full match
/// wins; a row can never contain two.
pub(crate) fn scan_row(canvas: &Canvas, y: u16) -> Option<RowMatch> {
    let mut state = ScanState::Start;
    let mut border = 0u16;
    let mut fill = 0u16;
    let mut eye = 0u16;

    for x in 0..canvas.width() {
        let pixel = canvas.pixel(x, y);

        if pixel == CROSSHAIR_BORDER {
            if state == ScanState::Fill1
                && border == 1
                && (fill == TG165.fill_width || fill == TG167.fill_width)
            {
                state = ScanState::Border2;
                border += 1;
            } else if state == ScanState::Eye
                && border == 2
                && (eye == TG165.eye_width || eye == TG167.eye_width)
            {
                state = ScanState::Border3;
                border += 1;
            } else if state == ScanState::Fill2
                && border == 3
                && (fill == 2 * TG165.fill_width || fill == 2 * TG167.fill_width)
            {
                state = ScanState::Border4;
                border += 1;
            } else {
                // Any unexpected border pixel re-anchors the pattern here
                state = ScanState::Border1;
                border = 1;
                fill = 0;
                eye = 0;
            }
        } else if pixel == CROSSHAIR_FILL {
            match state {
                ScanState::Border1 if border == 1 => {
                    state = ScanState::Fill1;
                    fill += 1;
                }
                ScanState::Border3 if border == 3 => {
                    state = ScanState::Fill2;
                    fill += 1;
                }
                ScanState::Fill1 | ScanState::Fill2 => fill += 1,
                _ => {
                    state = ScanState::Start;
                    border = 0;
                    fill = 0;
                    eye = 0;
                }
            }
        } else {
            match state {
                ScanState::Border2 if border == 2 => {
                    state = ScanState::Eye;
                    eye += 1;
                }
                ScanState::Eye => eye += 1,
                _ => {
                    state = ScanState::Start;
                    border = 0;
                    fill = 0;
                    eye = 0;
                }
            }
        }

        if border != BORDER_WIDTH {
            continue;
        }

        // Closing border seen: the fill and eye totals pick the model
        if fill == 2 * TG165.fill_width && eye == TG165.eye_width {
            return Some(RowMatch {
                model: Model::Tg165,
                spec: &TG165,
                end_x: x,
            });
        }
        if fill == 2 * TG167.fill_width && eye == TG167.eye_width {
            return Some(RowMatch {
                model: Model::Tg167,
                spec: &TG167,
                end_x: x,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermascan_core::Color;

    const EYE: Color = Color::from_raw(0x8124);

    /// Paint one valid cross-section row starting at `x`
    fn paint_section(canvas: &mut Canvas, x: u16, y: u16, fill_width: u16, eye_width: u16) {
        let mut col = x;
        let mut run = |color: Color, n: u16, col: &mut u16| {
            for _ in 0..n {
                canvas.set_pixel(*col, y, color);
                *col += 1;
            }
        };
        run(CROSSHAIR_BORDER, 1, &mut col);
        run(CROSSHAIR_FILL, fill_width, &mut col);
        run(CROSSHAIR_BORDER, 1, &mut col);
        run(EYE, eye_width, &mut col);
        run(CROSSHAIR_BORDER, 1, &mut col);
        run(CROSSHAIR_FILL, fill_width, &mut col);
        run(CROSSHAIR_BORDER, 1, &mut col);
    }

    #[test]
    fn test_tg165_section() {
        let mut canvas = Canvas::new(60, 3).unwrap();
        canvas.fill(EYE);
        paint_section(&mut canvas, 10, 1, 7, 5);

        assert!(row_qualifies(&canvas, 1));
        let m = scan_row(&canvas, 1).unwrap();
        assert_eq!(m.model, Model::Tg165);
        assert_eq!(m.end_x, 10 + 23 - 1);

        assert!(!row_qualifies(&canvas, 0));
        assert!(scan_row(&canvas, 0).is_none());
    }

    #[test]
    fn test_tg167_section() {
        let mut canvas = Canvas::new(60, 1).unwrap();
        canvas.fill(EYE);
        paint_section(&mut canvas, 3, 0, 14, 17);

        let m = scan_row(&canvas, 0).unwrap();
        assert_eq!(m.model, Model::Tg167);
        assert_eq!(m.end_x, 3 + 49 - 1);
    }

    #[test]
    fn test_mixed_widths_rejected() {
        // TG165 fill bars around a TG167-sized eye never match
        let mut canvas = Canvas::new(60, 1).unwrap();
        canvas.fill(EYE);
        paint_section(&mut canvas, 5, 0, 7, 17);
        assert!(scan_row(&canvas, 0).is_none());
    }

    #[test]
    fn test_reanchors_after_noise() {
        // A stray border/fill prefix before the true pattern
        let mut canvas = Canvas::new(80, 1).unwrap();
        canvas.fill(EYE);
        canvas.set_pixel(0, 0, CROSSHAIR_BORDER);
        canvas.set_pixel(1, 0, CROSSHAIR_FILL);
        canvas.set_pixel(2, 0, CROSSHAIR_FILL);
        paint_section(&mut canvas, 20, 0, 7, 5);

        let m = scan_row(&canvas, 0).unwrap();
        assert_eq!(m.model, Model::Tg165);
        assert_eq!(m.end_x, 20 + 23 - 1);
    }
}
