//! Pin level access the bitbot operations are built on.
//!
//! The [`Pins`] trait mirrors the primitives a block host offers for the micro:bit edge
//! connector: digital and analog reads and writes, pull configuration, microsecond delays,
//! pulse measurement and an LED strip output. `microbit` implements it on the nRF52833 and
//! `mock` implements it for host tests.

use smart_leds::RGB8;

use crate::Result;

#[cfg(feature = "board")]
pub mod microbit;

#[cfg(test)]
pub(crate) mod mock;

/// Pins on the micro:bit edge connector usable as digital I/O.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitalPin {
    P0,
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
    P8,
    P9,
    P10,
    P11,
    P12,
    P13,
    P14,
    P15,
    P16,
    P19,
    P20,
}

/// Pins on the micro:bit edge connector that can carry an analog value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogPin {
    P0,
    P1,
    P2,
    P3,
    P4,
    P10,
}

/// Logic level of a digital pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

/// Internal resistor configuration of an input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    #[default]
    None,
    Up,
    Down,
}

/// Largest value accepted by [`Pins::analog_write`] and returned by [`Pins::analog_read`].
pub const ANALOG_MAX: u16 = 1023;

/// Pin primitives of the board the bitbot is plugged into.
#[allow(async_fn_in_trait)]
pub trait Pins {
    /// Pixel sink handed out by [`Pins::neopixel`].
    type Pixels: PixelWriter;

    /// Drive `pin` as an output at `level`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::UnsupportedDigitalPin`] if `pin` cannot be driven.
    fn digital_write(&mut self, pin: DigitalPin, level: Level) -> Result<()>;

    /// Sample `pin` as an input.
    ///
    /// # Errors
    ///
    /// [`crate::Error::UnsupportedDigitalPin`] if `pin` cannot be read.
    fn digital_read(&mut self, pin: DigitalPin) -> Result<Level>;

    /// Write a PWM value in `0..=ANALOG_MAX` to `pin`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::UnsupportedAnalogPin`] if `pin` has no PWM channel.
    fn analog_write(&mut self, pin: AnalogPin, value: u16) -> Result<()>;

    /// Sample `pin` with the ADC, scaled to `0..=ANALOG_MAX`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::UnsupportedAnalogPin`] if `pin` has no ADC channel.
    async fn analog_read(&mut self, pin: AnalogPin) -> Result<u16>;

    /// Configure the pull resistor used the next time `pin` is an input.
    ///
    /// # Errors
    ///
    /// [`crate::Error::UnsupportedDigitalPin`] if `pin` has no configurable pull.
    fn set_pull(&mut self, pin: DigitalPin, pull: Pull) -> Result<()>;

    /// Wait at least `micros` microseconds.
    async fn delay_us(&mut self, micros: u32);

    /// Measure how long `pin` stays at `level` once it gets there.
    ///
    /// Both the wait for the leading edge and the pulse itself are bounded by `timeout_us`.
    /// Returns `Ok(None)` if either bound runs out.
    ///
    /// # Errors
    ///
    /// [`crate::Error::UnsupportedDigitalPin`] if `pin` cannot be read.
    async fn pulse_in(&mut self, pin: DigitalPin, level: Level, timeout_us: u32)
        -> Result<Option<u32>>;

    /// Claim the LED strip output on `pin` for a strip of `len` pixels.
    ///
    /// # Errors
    ///
    /// [`crate::Error::UnsupportedDigitalPin`] if `pin` cannot drive a strip, or
    /// [`crate::Error::StripUnavailable`] if the output was already claimed.
    fn neopixel(&mut self, pin: DigitalPin, len: usize) -> Result<Self::Pixels>;
}

/// Sink for complete LED strip frames.
#[allow(async_fn_in_trait)]
pub trait PixelWriter {
    /// Transmit `pixels`, first pixel first.
    ///
    /// # Errors
    ///
    /// [`crate::Error::StripWrite`] if the frame could not be sent.
    async fn write(&mut self, pixels: &[RGB8]) -> Result<()>;
}
