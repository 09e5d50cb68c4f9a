use crate::{neopixel::Strip, platform::Pins, Config};

/// Number of pixels on the bitbot LED strip.
pub const STRIP_LEN: usize = 12;

/// Represents a bitbot plugged into a board.
///
/// Owns the board pins and the LED strip. The strip is created the first time an LED operation
/// needs it and kept until the [`Bitbot`] is dropped.
///
/// The operations are spread over the modules that deal with each part of the robot:
/// motors in `wheels`, sensors in `light_sensors`, the sonar in `ultrasonic`, the buzzer in
/// `buzzer` and the LED strip in `neopixel`.
pub struct Bitbot<P: Pins> {
    pub(crate) pins: P,
    pub(crate) config: Config,
    pub(crate) strip: Option<Strip<P::Pixels, STRIP_LEN>>,
}

impl<P: Pins> Bitbot<P> {
    /// Create a new [`Bitbot`] with the classic wiring.
    #[must_use]
    pub fn new(pins: P) -> Self {
        Self::with_config(pins, Config::default())
    }

    #[must_use]
    pub fn with_config(pins: P, config: Config) -> Self {
        Self {
            pins,
            config,
            strip: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pins(&mut self) -> &mut P {
        &mut self.pins
    }

    /// Give back the pins, dropping the LED strip.
    pub fn release(self) -> P {
        self.pins
    }
}
