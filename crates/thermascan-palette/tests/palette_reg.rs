//! Palette round-trip regression test

use thermascan_palette::{PaletteCache, PaletteKind};
use thermascan_test::RegParams;

#[test]
fn palette_reg_value_color_round_trip() {
    let mut rp = RegParams::new("palette_roundtrip");

    // Rendering an intensity and inverting the color recovers the entry
    // that covers the intensity, for every palette and every intensity
    for kind in PaletteKind::ALL {
        let mut render = PaletteCache::new();
        let mut invert = PaletteCache::new();
        for v in 0..=255u8 {
            let entry = render.find_value(kind, v).unwrap();
            assert!(entry.covers(v));
            let recovered = invert.find_color(kind, entry.color).unwrap();
            rp.compare_values(entry.base as i64, recovered.base as i64);
            rp.compare_values(entry.width as i64, recovered.width as i64);
        }
    }

    assert!(rp.cleanup());
}

#[test]
fn palette_reg_exact_inversion_on_rainbow() {
    let mut rp = RegParams::new("palette_exact");

    // The width-1 palette inverts every intensity exactly
    let mut render = PaletteCache::new();
    let mut invert = PaletteCache::new();
    for v in 0..=255u8 {
        let color = render.find_value(PaletteKind::Rainbow, v).unwrap().color;
        let entry = invert.find_color(PaletteKind::Rainbow, color).unwrap();
        rp.compare_values(v as i64, entry.base as i64);
        rp.compare_values(1, entry.width as i64);
    }

    assert!(rp.cleanup());
}
