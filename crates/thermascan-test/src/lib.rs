//! thermascan-test - Regression test support
//!
//! Two pieces of shared test machinery:
//!
//! - [`RegParams`]: a comparison recorder for regression tests. Each
//!   comparison is numbered; failures are collected and reported on
//!   [`RegParams::cleanup`].
//! - [`synth`]: synthetic screenshot building. No real device captures
//!   ship with the repository, so tests render their own: palette-colored
//!   infrared canvases, crosshair overlays with a correct geometric
//!   signature, and OSD glyph runs.
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: set to "display" to run tests without failing on
//!   comparison mismatches (default: "compare")

mod params;
pub mod synth;

pub use params::{RegParams, RegTestMode};
