pub const DEFAULT_ADDRESS: u8 = 0x38;
pub const FRAME_LEN: usize = 16; // cells per frame, one per even RAM offset
pub const BAR_FRAME_COUNT: usize = 9;
pub const BLANK: u8 = 0x00;
pub const ALL_ON: u8 = 0xFF;

// bit 0 of every digit cell is an icon/flag bit, digits only use bits 7:1
pub const NUMBERS: [u8; 10] = [0xFA, 0x60, 0xBC, 0xF4, 0x66, 0xD6, 0xDE, 0x70, 0xFE, 0xF6];

pub const BAR_FRAMES: [[u8; FRAME_LEN]; BAR_FRAME_COUNT] = [
    [0x0E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x0E, 0x70, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x0E, 0xFC, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x0E, 0xFF, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x0E, 0xFF, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x0E, 0xFF, 0xFD, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x0E, 0xFF, 0xFF, 0x50, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x0E, 0xFF, 0xFF, 0xF8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x0E, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
];

pub mod command {
    pub const DISPLAY_DATA: u8 = 0xE0; // sub-address byte leading every transaction
    pub const RESET: [u8; 2] = [0x48, 0x70]; // written in order after power-on
}

/// Bus parameters the controller was characterised with. These are applied
/// by whatever HAL builds the `I2c` handed to the driver.
pub mod bus {
    pub const FREQUENCY_HZ: u32 = 100_000;
    pub const TIMEOUT_MS: u32 = 1000;
}

/// Cell indices and icon bits of the speed layout.
pub mod layout {
    pub const HUNDREDS_CELL: usize = 0;
    pub const STATUS_CELL: usize = 4;
    pub const UNITS_CELL: usize = 5;
    pub const TENS_CELL: usize = 6;

    pub const HUNDREDS_FLAG: u8 = 0x01;
    pub const BATTERY_LOW: u8 = 0x01; // bit 0 of STATUS_CELL
    pub const STATUS_ICONS: u8 = 0x06;
    pub const ICON: u8 = 0x01;

    // fixed unit/label icons that are always lit while showing a speed
    pub const ICON_CELLS: [usize; 6] = [UNITS_CELL, 9, 10, 11, 12, 15];
}
