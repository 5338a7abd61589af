#![no_std]

mod constants;
pub mod frame;
pub mod segment;
pub mod sequencer;

pub use constants::*;
pub use frame::{Cell, Frame};
pub use segment::{decode_digit, decompose, encode_digit, Digits};
pub use sequencer::{Config, Phase, RenderState, Sequencer};

use embedded_hal::i2c::I2c;
use num_traits::ToPrimitive;

pub struct SMS12130B<I2C> {
    pub i2c: I2C,
    pub address: u8,
}

impl<I2C, E> SMS12130B<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// Brings the controller out of its power-on state.
    pub fn reset(&mut self) -> Result<(), SMS12130BError<E>> {
        for value in command::RESET {
            self.write_register(command::DISPLAY_DATA, value)?;
        }
        #[cfg(feature = "defmt")]
        defmt::info!("SMS12130B at {=u8:#x} reset", self.address);
        Ok(())
    }

    pub fn fill(&mut self, data: u8) -> Result<(), SMS12130BError<E>> {
        self.write_frame(&Frame::filled(data))
    }

    pub fn clear(&mut self) -> Result<(), SMS12130BError<E>> {
        self.write_frame(&Frame::blank())
    }

    pub fn show_bar_frame(&mut self, index: usize) -> Result<(), SMS12130BError<E>> {
        let frame = Frame::bar(index).ok_or(SMS12130BError::InvalidValue)?;
        self.write_frame(&frame)
    }

    pub fn display_speed<T>(&mut self, speed: T, battery_low: bool) -> Result<(), SMS12130BError<E>>
    where
        T: ToPrimitive,
    {
        let speed = speed.to_u8().ok_or(SMS12130BError::InvalidValue)?;
        self.write_frame(&Frame::speed(decompose(speed), battery_low))
    }

    /// Writes every cell of `frame`, one transaction per cell.
    ///
    /// Gives up on the first failed transaction. Cells already written stay on
    /// the display until the next full frame replaces them.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), SMS12130BError<E>> {
        for cell in frame.cells() {
            self.i2c.write(self.address, &cell.to_bytes())?;
        }
        Ok(())
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), SMS12130BError<E>> {
        self.i2c.write(self.address, &[register, value])?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub enum SMS12130BError<E> {
    I2cError(E),
    InvalidValue,
    /// Bus writes kept failing for this many steps in a row.
    Unresponsive(u8),
}

impl<E> From<E> for SMS12130BError<E> {
    fn from(error: E) -> Self {
        SMS12130BError::I2cError(error)
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for SMS12130BError<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SMS12130BError::I2cError(_e) => defmt::write!(fmt, "I2C error"),
            SMS12130BError::InvalidValue => defmt::write!(fmt, "Invalid value"),
            SMS12130BError::Unresponsive(count) => {
                defmt::write!(fmt, "Display unresponsive after {} failed steps", count)
            }
        }
    }
}
