//! Startup animation and the counting speed loop as a steppable state machine.
//!
//! [`Sequencer::step`] performs one bus action and tells the caller how long to
//! pause before the next one, so it can be driven from any scheduler tick.
//! [`Sequencer::run`] is the blocking version that sleeps on a [`DelayNs`].

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::frame::Frame;
use crate::segment::decompose;
use crate::{SMS12130BError, ALL_ON, SMS12130B};

/// What the display shows once the step that entered this phase is done.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Uninit,
    Reset,
    FillTest,
    BarAnimating(u8),
    Cleared,
    /// Holds the state the next step renders.
    Rendering(RenderState),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderState {
    pub value: u8,
    pub battery_low: bool,
}

impl RenderState {
    pub fn frame(&self) -> Frame {
        Frame::speed(decompose(self.value), self.battery_low)
    }

    /// The state shown after this one: value counts up and wraps at
    /// `config.count_limit`, the battery icon blinks if enabled.
    pub fn next(self, config: &Config) -> Self {
        let value = (self.value as u16 + 1) % config.count_limit.clamp(1, 256);
        Self {
            value: value as u8,
            battery_low: self.battery_low ^ config.blink_battery,
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            value: 0,
            battery_low: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Hold time for the all-segments self test.
    pub fill_test_ms: u32,
    /// Time each bar animation frame stays up.
    pub bar_frame_ms: u32,
    /// Extra pause after the animation and after clearing.
    pub settle_ms: u32,
    /// Time each speed value stays up.
    pub render_ms: u32,
    /// Values count from 0 up to `count_limit - 1`, then wrap. At most 256.
    pub count_limit: u16,
    /// Toggle the battery-low icon on every rendered value. This is a demo
    /// blink, not a battery reading.
    pub blink_battery: bool,
    /// Consecutive failed steps after which the sequencer reports the display
    /// as unresponsive. `None` keeps going forever.
    pub max_consecutive_failures: Option<u8>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fill_test_ms: 1000,
            bar_frame_ms: 50,
            settle_ms: 50,
            render_ms: 250,
            count_limit: 200,
            blink_battery: true,
            max_consecutive_failures: Some(16),
        }
    }
}

pub struct Sequencer<I2C> {
    display: SMS12130B<I2C>,
    config: Config,
    phase: Phase,
    pause_ms: u32,
    failures: u8,
}

impl<I2C, E> Sequencer<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(display: SMS12130B<I2C>) -> Self {
        Self::with_config(display, Config::default())
    }

    pub fn with_config(display: SMS12130B<I2C>, config: Config) -> Self {
        Self {
            display,
            config,
            phase: Phase::Uninit,
            pause_ms: 0,
            failures: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Pause owed after the last step, whether or not it succeeded.
    pub fn pause_ms(&self) -> u32 {
        self.pause_ms
    }

    pub fn consecutive_failures(&self) -> u8 {
        self.failures
    }

    pub fn display(&mut self) -> &mut SMS12130B<I2C> {
        &mut self.display
    }

    /// Starts over from the controller reset, e.g. after the bus was
    /// re-initialised.
    pub fn restart(&mut self) {
        self.phase = Phase::Uninit;
        self.pause_ms = 0;
        self.failures = 0;
    }

    pub fn release(self) -> SMS12130B<I2C> {
        self.display
    }

    /// Runs the action leaving the current phase and moves to the next one.
    ///
    /// The phase advances even when the bus write fails; the error is handed
    /// back so the caller can log it, and the next full frame repaints the
    /// display. Returns the pause before the next step on success.
    pub fn step(&mut self) -> Result<u32, SMS12130BError<E>> {
        let last_bar = (Frame::bar_frame_count() - 1) as u8;
        let (result, next, pause_ms) = match self.phase {
            Phase::Uninit => (self.display.reset(), Phase::Reset, 0),
            Phase::Reset => (
                self.display.fill(ALL_ON),
                Phase::FillTest,
                self.config.fill_test_ms,
            ),
            Phase::FillTest => (
                self.display.show_bar_frame(0),
                Phase::BarAnimating(0),
                self.bar_pause(0, last_bar),
            ),
            Phase::BarAnimating(frame) if frame < last_bar => (
                self.display.show_bar_frame(frame as usize + 1),
                Phase::BarAnimating(frame + 1),
                self.bar_pause(frame + 1, last_bar),
            ),
            Phase::BarAnimating(_) => (self.display.clear(), Phase::Cleared, self.config.settle_ms),
            Phase::Cleared => self.render(RenderState::default()),
            Phase::Rendering(state) => self.render(state),
        };

        self.phase = next;
        self.pause_ms = pause_ms;
        self.track(result)?;
        Ok(pause_ms)
    }

    /// Runs the sequence forever, sleeping between steps.
    ///
    /// Failed steps are skipped over. Only returns once the display has been
    /// unresponsive for `max_consecutive_failures` steps in a row.
    pub fn run<D: DelayNs>(&mut self, delay: &mut D) -> Result<Infallible, SMS12130BError<E>> {
        loop {
            match self.step() {
                Ok(pause_ms) => delay.delay_ms(pause_ms),
                Err(SMS12130BError::Unresponsive(count)) => {
                    #[cfg(feature = "defmt")]
                    defmt::error!("display unresponsive, {} failed steps", count);
                    return Err(SMS12130BError::Unresponsive(count));
                }
                Err(_error) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("display step failed: {}", _error);
                    delay.delay_ms(self.pause_ms);
                }
            }
        }
    }

    fn render(&mut self, state: RenderState) -> (Result<(), SMS12130BError<E>>, Phase, u32) {
        let result = self.display.write_frame(&state.frame());
        (
            result,
            Phase::Rendering(state.next(&self.config)),
            self.config.render_ms,
        )
    }

    fn bar_pause(&self, frame: u8, last_bar: u8) -> u32 {
        if frame == last_bar {
            self.config.bar_frame_ms + self.config.settle_ms
        } else {
            self.config.bar_frame_ms
        }
    }

    fn track(&mut self, result: Result<(), SMS12130BError<E>>) -> Result<(), SMS12130BError<E>> {
        match result {
            Ok(()) => {
                self.failures = 0;
                Ok(())
            }
            Err(error) => {
                self.failures = self.failures.saturating_add(1);
                match self.config.max_consecutive_failures {
                    Some(limit) if self.failures >= limit => {
                        Err(SMS12130BError::Unresponsive(self.failures))
                    }
                    _ => Err(error),
                }
            }
        }
    }
}
