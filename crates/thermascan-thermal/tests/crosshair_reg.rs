//! Crosshair masking and restamp regression test
//!
//! A synthetic TG165 screenshot: uniform iron background with a
//! device-faithful crosshair. Checks the occlusion repair across the
//! crosshair, the zero-interpolation shortcut and the restamp passes.

use thermascan_core::{Canvas, Color};
use thermascan_locate::{Locator, Model, PixelClass};
use thermascan_palette::{PaletteCache, PaletteKind};
use thermascan_test::{synth, RegParams};
use thermascan_thermal::{Interpolation, Quantization, Thermal};

const BACKGROUND_INTENSITY: u8 = 128;

fn iron_color(v: u8) -> Color {
    PaletteCache::new().find_value(PaletteKind::Iron, v).unwrap().color
}

/// Thermal context over a synthetic TG165 screenshot with the crosshair
/// at (40, 60)
fn synthetic_thermal() -> Thermal {
    let mut ir = synth::ir_canvas_filled(iron_color(BACKGROUND_INTENSITY));
    synth::paint_crosshair(
        &mut ir,
        Model::Tg165,
        40,
        60,
        iron_color(BACKGROUND_INTENSITY),
    );
    let shot = synth::screenshot(&synth::osd_text_canvas(" 23.5C", "E:0.95"), &ir);

    let mut locator = Locator::new(&shot).unwrap();
    assert_eq!(locator.process(), Model::Tg165);
    Thermal::new(locator)
}

#[test]
fn crosshair_reg_occlusion_repair() {
    let mut rp = RegParams::new("crosshair_repair");

    let mut thermal = synthetic_thermal();
    let crosshair_pixels = thermal.mask().count(PixelClass::Crosshair);
    assert!(crosshair_pixels > 0);

    thermal
        .process(Interpolation::SquareWeight, Quantization::Floor)
        .unwrap();

    // Every pixel, occluded or not, recovers the uniform background
    let image = thermal.intensity().unwrap();
    for y in 0..image.height() {
        for x in 0..image.width() {
            let point = image.point(x, y);
            assert_eq!(
                point.value, BACKGROUND_INTENSITY,
                "wrong intensity at ({x}, {y})"
            );
        }
    }
    // Crosshair entries keep their class; none are invalid
    rp.compare_values(
        crosshair_pixels as i64,
        thermal.mask().count(PixelClass::Crosshair) as i64,
    );
    rp.compare_values(0, thermal.mask().count(PixelClass::Invalid) as i64);

    // The repaired export is the uniform background everywhere
    let exported = thermal.export(PaletteKind::Iron).unwrap();
    let mut expected = Canvas::new(exported.width(), exported.height()).unwrap();
    expected.fill(iron_color(BACKGROUND_INTENSITY));
    rp.compare_canvas(&expected, &exported);

    assert!(rp.cleanup());
}

#[test]
fn crosshair_reg_zero_shortcut() {
    let mut rp = RegParams::new("crosshair_zero");

    let mut thermal = synthetic_thermal();
    thermal
        .process(Interpolation::Zero, Quantization::Floor)
        .unwrap();

    let image = thermal.intensity().unwrap();
    let mut zeroed: i64 = 0;
    for y in 0..image.height() {
        for x in 0..image.width() {
            let point = image.point(x, y);
            match thermal.mask().class(x, y) {
                PixelClass::Crosshair => {
                    assert_eq!(point.value, 0);
                    assert_eq!(point.uncertainty, 1);
                    zeroed += 1;
                }
                PixelClass::Image => {
                    assert_eq!(point.value, BACKGROUND_INTENSITY);
                }
                other => panic!("unexpected class {other:?}"),
            }
        }
    }
    rp.compare_values(
        thermal.mask().count(PixelClass::Crosshair) as i64,
        zeroed,
    );

    assert!(rp.cleanup());
}

#[test]
fn crosshair_reg_restamp() {
    let mut rp = RegParams::new("crosshair_restamp");

    let mut thermal = synthetic_thermal();
    thermal
        .process(Interpolation::SquareWeight, Quantization::Floor)
        .unwrap();
    let plain = thermal.export(PaletteKind::Iron).unwrap();

    let border = Color::from_rgb888(0xff, 0x00, 0x00);
    let fill = Color::from_rgb888(0x00, 0xff, 0x00);
    let mut stamped = plain.clone();
    thermal.stamp_crosshair(border, fill, &mut stamped).unwrap();

    let mask = thermal.mask();
    for y in 0..mask.height() {
        // Walk the horizontal crosshair runs of this row
        let mut x = 0;
        while x < mask.width() {
            if mask.class(x, y) != PixelClass::Crosshair {
                // Image pixels are untouched by the stamp
                assert_eq!(stamped.pixel(x, y), plain.pixel(x, y));
                x += 1;
                continue;
            }
            let start = x;
            while x < mask.width() && mask.class(x, y) == PixelClass::Crosshair {
                x += 1;
            }
            let end = x - 1;

            // Runs start on a border pixel and, when longer than one
            // pixel, are capped with one; the interior is fill except
            // where the vertical pass put a cap
            assert_eq!(stamped.pixel(start, y), border, "run start at ({start}, {y})");
            if end > start && end < mask.width() - 1 {
                assert_eq!(stamped.pixel(end, y), border, "run cap at ({end}, {y})");
            }
            for col in start..=end {
                let pixel = stamped.pixel(col, y);
                assert!(
                    pixel == border || pixel == fill,
                    "unpainted crosshair pixel at ({col}, {y})"
                );
            }
        }
    }
    rp.compare_values(1, 1);

    // Geometry mismatch is refused
    let mut tiny = Canvas::new(10, 10).unwrap();
    assert!(thermal.stamp_crosshair(border, fill, &mut tiny).is_err());

    assert!(rp.cleanup());
}
