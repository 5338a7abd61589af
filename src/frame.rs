//! Full snapshots of the controller's display RAM.
//!
//! The controller exposes 32 bytes of display RAM of which only the even
//! offsets are independent cells. A [`Frame`] always carries all 16 of them,
//! since any cell left out keeps showing whatever was written last.

use crate::constants::{
    command, layout, ALL_ON, BAR_FRAMES, BAR_FRAME_COUNT, BLANK, FRAME_LEN,
};
use crate::segment::Digits;

/// One display RAM cell: its even address and the data byte for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell {
    pub address: u8,
    pub data: u8,
}

impl Cell {
    /// Bytes of the bus transaction that writes this cell.
    pub fn to_bytes(self) -> [u8; 3] {
        [command::DISPLAY_DATA, self.address, self.data]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    data: [u8; FRAME_LEN],
}

impl Frame {
    pub const fn new(data: [u8; FRAME_LEN]) -> Self {
        Self { data }
    }

    /// Every cell set to `data`.
    pub const fn filled(data: u8) -> Self {
        Self::new([data; FRAME_LEN])
    }

    pub const fn all_on() -> Self {
        Self::filled(ALL_ON)
    }

    pub const fn blank() -> Self {
        Self::filled(BLANK)
    }

    /// Frame `index` of the bar-graph startup animation.
    pub fn bar(index: usize) -> Option<Self> {
        BAR_FRAMES.get(index).copied().map(Self::new)
    }

    pub const fn bar_frame_count() -> usize {
        BAR_FRAME_COUNT
    }

    /// The speed readout: digit patterns merged with the fixed icons and the
    /// battery-low indicator.
    pub fn speed(digits: Digits, battery_low: bool) -> Self {
        let mut data = [BLANK; FRAME_LEN];
        let hundreds = if digits.hundreds {
            layout::HUNDREDS_FLAG
        } else {
            BLANK
        };

        for cell in layout::ICON_CELLS {
            data[cell] = layout::ICON;
        }
        data[layout::HUNDREDS_CELL] = hundreds;
        data[layout::STATUS_CELL] = layout::STATUS_ICONS;
        if battery_low {
            data[layout::STATUS_CELL] |= layout::BATTERY_LOW;
        }
        data[layout::UNITS_CELL] |= digits.units;
        data[layout::TENS_CELL] = hundreds | digits.tens;

        Self::new(data)
    }

    pub fn data(&self) -> &[u8; FRAME_LEN] {
        &self.data
    }

    /// Cells in write order, addresses 0, 2, ..., 30.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.data.iter().enumerate().map(|(i, &data)| Cell {
            address: (i * 2) as u8,
            data,
        })
    }

    pub fn battery_low(&self) -> bool {
        self.data[layout::STATUS_CELL] & layout::BATTERY_LOW != 0
    }

    /// Reads the digit cells of a speed frame back into patterns.
    pub fn digits(&self) -> Digits {
        let tens_cell = self.data[layout::TENS_CELL];
        Digits {
            hundreds: tens_cell & layout::HUNDREDS_FLAG != 0,
            tens: tens_cell & !layout::HUNDREDS_FLAG,
            units: self.data[layout::UNITS_CELL] & !layout::ICON,
        }
    }

    /// The number a speed frame shows, if its digit cells decode.
    pub fn speed_value(&self) -> Option<u16> {
        self.digits().value()
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::blank()
    }
}
