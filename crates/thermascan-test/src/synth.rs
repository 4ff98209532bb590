//! Synthetic screenshot rendering
//!
//! Builds device-faithful inputs for tests: a crosshair overlay whose eye
//! row carries the exact border/fill/eye cross-section the locator scans
//! for, OSD glyph runs painted from the signature tables, and complete
//! 174x220 screenshots assembled from the pieces.

use thermascan_core::{Canvas, Color};
use thermascan_locate::{
    Model, CROSSHAIR_BORDER, CROSSHAIR_FILL, EMISSIVITY_ORIGIN, IR_RECT, SCREENSHOT_HEIGHT,
    SCREENSHOT_WIDTH, TEMPERATURE_ORIGIN, TEXT_RECT,
};
use thermascan_ocr::{LARGE, SMALL};

/// Paint a crosshair overlay for `model` with its origin at (`cx`, `cy`).
///
/// The opaque overlay rectangles are painted border-black, the aperture
/// (eye) is filled with `eye_color`, and the eye row is repainted with
/// the precise border/fill/eye cross-section. Only the eye row carries
/// white fill, as on the device, so the locator locks onto exactly that
/// row and identifies the model.
///
/// # Panics
///
/// Panics if `model` is [`Model::Unknown`] or the crosshair does not fit
/// the canvas.
pub fn paint_crosshair(canvas: &mut Canvas, model: Model, cx: u16, cy: u16, eye_color: Color) {
    let spec = model.spec().expect("paint_crosshair needs a known model");
    assert!(cx + spec.crosshair_width() <= canvas.width());
    assert!(cy + spec.crosshair_height <= canvas.height());

    // Opaque overlay
    for rect in &spec.overlay {
        for y in rect.y..rect.y + rect.h {
            for x in rect.x..rect.x + rect.w {
                canvas.set_pixel(cx + x, cy + y, CROSSHAIR_BORDER);
            }
        }
    }

    // The aperture keeps image colors
    let (ex, ey) = spec.eye_offset;
    for y in 0..spec.eye_height {
        for x in 0..spec.eye_width {
            canvas.set_pixel(cx + ex + x, cy + ey + y, eye_color);
        }
    }

    // The eye row: border, fill, border, eye, border, fill, border
    let row = cy + spec.target_row;
    let f = spec.fill_width;
    let e = spec.eye_width;
    for x in 1..1 + f {
        canvas.set_pixel(cx + x, row, CROSSHAIR_FILL);
    }
    for x in 3 + f + e..3 + 2 * f + e {
        canvas.set_pixel(cx + x, row, CROSSHAIR_FILL);
    }
    for x in [0, 1 + f, 2 + f + e, 3 + 2 * f + e] {
        canvas.set_pixel(cx + x, row, CROSSHAIR_BORDER);
    }
}

/// Build a text strip with the OSD readouts painted at the device offsets.
///
/// `temperature` is painted in the large font at (0, 0), `emissivity` in
/// the small font at (110, 3), both with pitch 0.
pub fn osd_text_canvas(temperature: &str, emissivity: &str) -> Canvas {
    let mut canvas = Canvas::new(TEXT_RECT.w, TEXT_RECT.h).unwrap();
    LARGE
        .paint_string(
            &mut canvas,
            TEMPERATURE_ORIGIN.0,
            TEMPERATURE_ORIGIN.1,
            0,
            temperature,
        )
        .expect("temperature string must render");
    SMALL
        .paint_string(
            &mut canvas,
            EMISSIVITY_ORIGIN.0,
            EMISSIVITY_ORIGIN.1,
            0,
            emissivity,
        )
        .expect("emissivity string must render");
    canvas
}

/// Build an infrared canvas (150x175) filled with one color
pub fn ir_canvas_filled(color: Color) -> Canvas {
    let mut canvas = Canvas::new(IR_RECT.w, IR_RECT.h).unwrap();
    canvas.fill(color);
    canvas
}

/// Assemble a complete 174x220 screenshot from a text strip and an
/// infrared canvas.
///
/// # Panics
///
/// Panics if the pieces do not have the device geometry.
pub fn screenshot(text: &Canvas, ir: &Canvas) -> Canvas {
    assert_eq!((text.width(), text.height()), (TEXT_RECT.w, TEXT_RECT.h));
    assert_eq!((ir.width(), ir.height()), (IR_RECT.w, IR_RECT.h));

    let mut shot = Canvas::new(SCREENSHOT_WIDTH, SCREENSHOT_HEIGHT).unwrap();
    shot.merge(
        text,
        0,
        0,
        TEXT_RECT.x as i32,
        TEXT_RECT.y as i32,
        text.width(),
        text.height(),
    )
    .unwrap();
    shot.merge(
        ir,
        0,
        0,
        IR_RECT.x as i32,
        IR_RECT.y as i32,
        ir.width(),
        ir.height(),
    )
    .unwrap();
    shot
}
