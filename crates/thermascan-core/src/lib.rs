//! thermascan-core - Pixel primitives for the thermascan workspace
//!
//! Provides the two types every other crate builds on:
//!
//! - [`Color`]: a 16-bit RGB 5:6:5 color value, the native pixel format of
//!   the TG-series camera display
//! - [`Canvas`]: an owned, row-major grid of colors with region copy and
//!   merge operations
//!
//! plus the [`Rect`] geometry helper shared by the locator and the thermal
//! context.

mod canvas;
mod color;
mod error;
mod rect;

pub use canvas::Canvas;
pub use color::Color;
pub use error::{Error, Result};
pub use rect::Rect;
