use crate::platform::{AnalogPin, DigitalPin};

/// Errors reported by the platform pins or the LED strip.
///
/// Inputs are never rejected by the bitbot operations themselves: selectors are enums and speeds
/// are clamped. Every variant here originates in the platform.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The platform has nothing wired to this pin for the requested direction.
    #[error("digital pin {0:?} is not available")]
    UnsupportedDigitalPin(DigitalPin),
    /// The platform cannot read or write an analog value on this pin.
    #[error("analog pin {0:?} is not available")]
    UnsupportedAnalogPin(AnalogPin),
    /// The LED output has already been handed out.
    #[error("led strip output already claimed")]
    StripUnavailable,
    /// Transmitting a frame to the LED strip failed.
    #[error("failed to write led strip frame")]
    StripWrite,
}

pub type Result<T> = core::result::Result<T, Error>;
