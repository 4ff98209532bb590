//! OSD recognition regression test
//!
//! Renders OSD strips from the glyph tables and runs them through
//! `Thermal::ocr`: unit conversion, emissivity parsing and the failure
//! modes on malformed readouts.

use thermascan_core::Canvas;
use thermascan_locate::Locator;
use thermascan_palette::{PaletteCache, PaletteKind};
use thermascan_test::{synth, RegParams};
use thermascan_thermal::{Thermal, ThermalError};

fn thermal_with_text(temperature: &str, emissivity: &str) -> Thermal {
    let text = synth::osd_text_canvas(temperature, emissivity);
    let ir = synth::ir_canvas_filled(
        PaletteCache::new()
            .find_value(PaletteKind::Iron, 128)
            .unwrap()
            .color,
    );
    Thermal::new(Locator::from_parts(text, ir))
}

#[test]
fn ocr_reg_celsius() {
    let mut rp = RegParams::new("ocr_celsius");

    let mut thermal = thermal_with_text("-10.5C", "E:0.95");
    thermal.ocr().unwrap();
    rp.compare_values(-105, thermal.temperature_spot().unwrap() as i64);
    rp.compare_values(95, thermal.emissivity().unwrap() as i64);

    assert!(rp.cleanup());
}

#[test]
fn ocr_reg_fahrenheit_converts() {
    let mut rp = RegParams::new("ocr_fahrenheit");

    // (23F - 32) * 5 / 9 = -5C
    let mut thermal = thermal_with_text("023.0F", "E:0.95");
    thermal.ocr().unwrap();
    rp.compare_values(-50, thermal.temperature_spot().unwrap() as i64);

    let mut thermal = thermal_with_text("212.0F", "E:0.50");
    thermal.ocr().unwrap();
    rp.compare_values(1000, thermal.temperature_spot().unwrap() as i64);
    rp.compare_values(50, thermal.emissivity().unwrap() as i64);

    assert!(rp.cleanup());
}

#[test]
fn ocr_reg_zero_emissivity_rejected() {
    let mut thermal = thermal_with_text(" 23.5C", "E:0.00");
    assert!(matches!(
        thermal.ocr(),
        Err(ThermalError::OsdFormat {
            field: "emissivity",
            ..
        })
    ));
    // The temperature was parsed before the emissivity failed
    assert_eq!(thermal.temperature_spot(), Some(235));
}

#[test]
fn ocr_reg_lo_readout_rejected() {
    // The display shows "L O" glyphs when the scene is out of range
    let mut thermal = thermal_with_text("LO    ", "E:0.95");
    assert!(matches!(
        thermal.ocr(),
        Err(ThermalError::OsdFormat {
            field: "temperature",
            ..
        })
    ));
}

#[test]
fn ocr_reg_wrong_text_shape() {
    let ir = synth::ir_canvas_filled(
        PaletteCache::new()
            .find_value(PaletteKind::Iron, 10)
            .unwrap()
            .color,
    );
    let mut thermal = Thermal::new(Locator::from_parts(Canvas::new(20, 20).unwrap(), ir));
    assert!(matches!(
        thermal.ocr(),
        Err(ThermalError::TextShape { .. })
    ));
}
