//! Palette inversion regression test
//!
//! Synthetic canvases with known palette colors, exercised through the
//! full create/process/export flow: round trips, quantization modes,
//! interpolation policies and the skip bookkeeping.

use thermascan_core::{Canvas, Color};
use thermascan_locate::{Locator, PixelClass};
use thermascan_palette::{PaletteCache, PaletteKind};
use thermascan_test::RegParams;
use thermascan_thermal::{Interpolation, Quantization, Thermal, ThermalError};

/// A color no palette uses (checked by the palette unit tests)
const STRAY: Color = Color::from_components(1, 63, 1);

fn thermal_from_ir(ir: Canvas) -> Thermal {
    Thermal::new(Locator::from_parts(Canvas::new(1, 1).unwrap(), ir))
}

/// The color a palette renders intensity `v` with
fn color_of(kind: PaletteKind, v: u8) -> Color {
    PaletteCache::new().find_value(kind, v).unwrap().color
}

#[test]
fn process_reg_iron_floor_round_trip() {
    let mut rp = RegParams::new("process_iron_floor");

    // Eight iron colors at intensities 0, 10, .. 70 on a 4x2 canvas
    let mut canvas = Canvas::new(4, 2).unwrap();
    for i in 0..8u8 {
        canvas.set_pixel(i as u16 % 4, i as u16 / 4, color_of(PaletteKind::Iron, i * 10));
    }

    let mut thermal = thermal_from_ir(canvas.clone());
    thermal
        .process(Interpolation::Zero, Quantization::Floor)
        .unwrap();
    rp.compare_values(
        PaletteKind::Iron.index() as i64,
        thermal.palette().index() as i64,
    );

    // Floor maps every intensity to its entry base
    let image = thermal.intensity().unwrap();
    let mut cache = PaletteCache::new();
    for i in 0..8u8 {
        let point = image.point(i as u16 % 4, i as u16 / 4);
        let entry = cache.find_value(PaletteKind::Iron, i * 10).unwrap();
        rp.compare_values(entry.base as i64, point.value as i64);
        rp.compare_values(entry.width as i64, point.uncertainty as i64);
    }

    // Exporting with the same palette reproduces the canvas exactly
    let exported = thermal.export(PaletteKind::Iron).unwrap();
    rp.compare_canvas(&canvas, &exported);

    assert!(rp.cleanup());
}

#[test]
fn process_reg_rainbow_exact_round_trip() {
    let mut rp = RegParams::new("process_rainbow_exact");

    // All 256 rainbow colors on a 16x16 canvas
    let mut canvas = Canvas::new(16, 16).unwrap();
    for v in 0..=255u8 {
        canvas.set_pixel(v as u16 % 16, v as u16 / 16, color_of(PaletteKind::Rainbow, v));
    }

    let mut thermal = thermal_from_ir(canvas.clone());
    thermal
        .process(Interpolation::Zero, Quantization::Exact)
        .unwrap();

    // Exact recovery is bit-identical
    let image = thermal.intensity().unwrap();
    for v in 0..=255u8 {
        let point = image.point(v as u16 % 16, v as u16 / 16);
        rp.compare_values(v as i64, point.value as i64);
        rp.compare_values(1, point.uncertainty as i64);
    }
    let exported = thermal.export(PaletteKind::Rainbow).unwrap();
    rp.compare_canvas(&canvas, &exported);

    assert!(rp.cleanup());
}

#[test]
fn process_reg_exact_rejects_wide_palettes() {
    // Iron and grayscale have entries wider than one intensity
    for kind in [PaletteKind::Iron, PaletteKind::Grayscale] {
        let mut canvas = Canvas::new(4, 2).unwrap();
        for i in 0..8u8 {
            canvas.set_pixel(i as u16 % 4, i as u16 / 4, color_of(kind, i * 9 + 1));
        }
        let mut thermal = thermal_from_ir(canvas);
        assert!(matches!(
            thermal.process(Interpolation::Zero, Quantization::Exact),
            Err(ThermalError::QuantizationWidth { .. })
        ));
    }
}

#[test]
fn process_reg_quantization_stays_in_entry_range() {
    let mut rp = RegParams::new("process_quantization");

    for kind in [PaletteKind::Iron, PaletteKind::Grayscale, PaletteKind::Rainbow] {
        let entries = kind.entries();
        let width = 16u16;
        let height = entries.len().div_ceil(16) as u16;

        for mode in [
            Quantization::Floor,
            Quantization::Ceiling,
            Quantization::MedianLow,
            Quantization::MedianHigh,
        ] {
            let mut canvas = Canvas::new(width, height).unwrap();
            for (i, entry) in entries.iter().enumerate() {
                canvas.set_pixel(i as u16 % width, i as u16 / width, entry.color);
            }
            // Pad the tail of the last row with the first entry's color
            for i in entries.len()..(width as usize * height as usize) {
                canvas.set_pixel(i as u16 % width, i as u16 / width, entries[0].color);
            }

            let mut thermal = thermal_from_ir(canvas);
            thermal.process(Interpolation::Zero, mode).unwrap();
            let image = thermal.intensity().unwrap();

            // Every recovered intensity lies inside the entry that
            // rendered its color, and re-rendering hits the same color
            for (i, entry) in entries.iter().enumerate() {
                let point = image.point(i as u16 % width, i as u16 / width);
                assert!(
                    entry.covers(point.value),
                    "{kind} {mode:?}: {} outside [{}..{})",
                    point.value,
                    entry.base,
                    entry.base as u16 + entry.width as u16
                );
                assert_eq!(point.uncertainty, entry.width);
            }
            rp.compare_values(0, thermal.mask().count(PixelClass::Invalid) as i64);
        }
    }

    assert!(rp.cleanup());
}

#[test]
fn process_reg_invalid_pixel_interpolation() {
    let mut rp = RegParams::new("process_invalid");

    // 5x5: center is a stray color, the inner ring renders intensity 10,
    // the outer ring intensity 100
    let inner = color_of(PaletteKind::Iron, 10);
    let outer = color_of(PaletteKind::Iron, 100);
    let build = || {
        let mut canvas = Canvas::new(5, 5).unwrap();
        canvas.fill(outer);
        for y in 1..4 {
            for x in 1..4 {
                canvas.set_pixel(x, y, inner);
            }
        }
        canvas.set_pixel(2, 2, STRAY);
        canvas
    };

    // Expected replacements per interpolation mode
    let cases = [
        (Interpolation::Zero, 0u8),
        (Interpolation::Min, 10),
        (Interpolation::Max, 100),
        (Interpolation::Med, 70),
        (Interpolation::SquareSmall, 70),
        (Interpolation::SquareWeight, 35),
        (Interpolation::SquareLarge, 61),
    ];
    for (mode, expected) in cases {
        let mut thermal = thermal_from_ir(build());
        thermal.process(mode, Quantization::Floor).unwrap();
        let point = thermal.intensity().unwrap().point(2, 2);
        rp.compare_values(expected as i64, point.value as i64);
        rp.compare_values(1, point.uncertainty as i64);
        // The invalid entry was promoted back to image data
        rp.compare_values(0, thermal.mask().count(PixelClass::Invalid) as i64);
        assert_eq!(thermal.mask().class(2, 2), PixelClass::Image);
    }

    assert!(rp.cleanup());
}

#[test]
fn process_reg_statistics() {
    let mut rp = RegParams::new("process_stats");

    let mut canvas = Canvas::new(4, 1).unwrap();
    for (x, v) in [20u8, 40, 60, 200].into_iter().enumerate() {
        canvas.set_pixel(x as u16, 0, color_of(PaletteKind::Iron, v));
    }
    let mut thermal = thermal_from_ir(canvas);
    thermal
        .process(Interpolation::Zero, Quantization::Floor)
        .unwrap();

    let stats = thermal.stats().unwrap();
    rp.compare_values(20, stats.min as i64);
    rp.compare_values(200, stats.max as i64);
    rp.compare_values(80, stats.mean as i64);

    assert!(rp.cleanup());
}

#[test]
fn process_reg_reprocess_needs_discard() {
    let mut canvas = Canvas::new(2, 2).unwrap();
    canvas.fill(color_of(PaletteKind::Grayscale, 128));

    let mut thermal = thermal_from_ir(canvas);
    thermal
        .process(Interpolation::Zero, Quantization::Floor)
        .unwrap();

    // A second run is refused until the image is discarded
    assert!(matches!(
        thermal.process(Interpolation::Zero, Quantization::Floor),
        Err(ThermalError::IntensityExists)
    ));
    assert!(thermal.discard_intensity().is_some());
    thermal
        .process(Interpolation::Zero, Quantization::Ceiling)
        .unwrap();
    assert_eq!(thermal.intensity().unwrap().point(0, 0).value, 131);
}

#[test]
fn process_reg_all_stray_fails() {
    // A canvas without a single palette color cannot be processed
    let mut canvas = Canvas::new(3, 3).unwrap();
    canvas.fill(STRAY);
    let mut thermal = thermal_from_ir(canvas);
    assert!(thermal
        .process(Interpolation::Zero, Quantization::Floor)
        .is_err());
}
