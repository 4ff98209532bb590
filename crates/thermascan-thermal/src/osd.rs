//! OSD readout parsing
//!
//! The recognized glyph strings carry the spot temperature
//! (`[-]?\d+.\dU` with U being C or F, e.g. `" 23.5C"`) and the
//! emissivity (`E:0.dd`). Temperatures are stored in tenths of a degree
//! Celsius; Fahrenheit readouts are converted.

use crate::error::{ThermalError, ThermalResult};

/// Parse a temperature readout into tenths of a degree Celsius.
///
/// Accepts leading spaces and a leading minus; the fraction is a single
/// digit. `-10.5C` parses to -105; `023.0F` converts to -50.
pub fn parse_temperature(text: &str) -> ThermalResult<i16> {
    let fail = || ThermalError::OsdFormat {
        field: "temperature",
        text: text.to_string(),
    };

    let mut chars = text.chars().peekable();
    while chars.peek() == Some(&' ') {
        chars.next();
    }

    let negative = chars.peek() == Some(&'-');
    if negative {
        chars.next();
    }

    let mut integer: i32 = 0;
    let mut digits = 0;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        integer = integer * 10 + d as i32;
        digits += 1;
        chars.next();
    }
    if digits == 0 || chars.next() != Some('.') {
        return Err(fail());
    }

    let fraction = chars.next().and_then(|c| c.to_digit(10)).ok_or_else(fail)? as i32;
    let unit = chars.next().ok_or_else(fail)?;
    if chars.next().is_some() {
        return Err(fail());
    }

    let (integer, fraction) = if negative {
        (-integer, -fraction)
    } else {
        (integer, fraction)
    };

    let tenths = match unit {
        'C' => integer * 10 + fraction,
        'F' => {
            // Tenths of Fahrenheit above freezing, times five; round the
            // division by nine away from the truncation when the
            // remainder reaches five
            let mut t = ((integer - 32) * 10 + fraction) * 5;
            if t % 9 >= 5 {
                t += 8;
            }
            t / 9
        }
        _ => return Err(fail()),
    };

    Ok(tenths as i16)
}

/// Parse an emissivity readout (`E:0.dd`) into percent.
///
/// A reading of zero is rejected; the display never shows one.
pub fn parse_emissivity(text: &str) -> ThermalResult<u8> {
    let fail = || ThermalError::OsdFormat {
        field: "emissivity",
        text: text.to_string(),
    };

    let digits = text.strip_prefix("E:0.").ok_or_else(fail)?;
    if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(fail());
    }

    let value: u8 = digits.parse().map_err(|_| fail())?;
    if value == 0 {
        return Err(fail());
    }
    Ok(value)
}
