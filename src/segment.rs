//! Digit to segment-pattern encoding for the three-position speed readout.

use crate::constants::{BLANK, NUMBERS};

/// Segment patterns for a value split across the readout.
///
/// The hundreds position is a single "1" segment rather than a full digit, so
/// it is carried as a flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digits {
    pub hundreds: bool,
    pub tens: u8,
    pub units: u8,
}

impl Digits {
    /// The value the readout shows for these patterns, or `None` if a
    /// pattern does not belong to the digit table.
    pub fn value(&self) -> Option<u16> {
        let tens = match self.tens {
            BLANK => 0,
            pattern => decode_digit(pattern)?,
        };
        let units = decode_digit(self.units)?;
        let hundreds = if self.hundreds { 100 } else { 0 };
        Some(hundreds + tens as u16 * 10 + units as u16)
    }
}

/// Returns the segment pattern for `digit`, or a blank cell for anything
/// outside 0-9.
pub fn encode_digit(digit: u8) -> u8 {
    NUMBERS.get(digit as usize).copied().unwrap_or(BLANK)
}

/// Inverse of [`encode_digit`]. Bit 0 is shared with icons and ignored.
pub fn decode_digit(pattern: u8) -> Option<u8> {
    let pattern = pattern & !0x01;
    NUMBERS
        .iter()
        .position(|&p| p == pattern)
        .map(|digit| digit as u8)
}

/// Splits `value` into readout patterns.
///
/// Leading zeros are suppressed: below 10 the tens cell is blank, not `0`.
/// From 100 up the hundreds flag is lit and only the last two decimal
/// digits get real patterns, so 200..=255 read back as 100 + value % 100.
pub fn decompose(value: u8) -> Digits {
    let units = encode_digit(value % 10);
    if value < 10 {
        return Digits {
            hundreds: false,
            tens: BLANK,
            units,
        };
    }

    Digits {
        hundreds: value >= 100,
        tens: encode_digit((value / 10) % 10),
        units,
    }
}
