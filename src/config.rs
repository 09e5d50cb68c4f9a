//! Wiring and tunables of the bitbot.

use crate::platform::{AnalogPin, DigitalPin};

/// Which micro:bit pin each part of the bitbot is wired to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pinout {
    pub left_motor_speed: AnalogPin,
    pub left_motor_direction: DigitalPin,
    pub right_motor_speed: AnalogPin,
    pub right_motor_direction: DigitalPin,
    pub buzzer: DigitalPin,
    pub left_line: DigitalPin,
    pub right_line: DigitalPin,
    /// Selects which light sensor is routed to [`Pinout::light`]; low is left.
    pub light_select: DigitalPin,
    pub light: AnalogPin,
    pub neopixel: DigitalPin,
    /// Trigger and echo of the ultrasonic module share this pin.
    pub sonar: DigitalPin,
}

impl Pinout {
    /// Wiring of the classic Bit:Bot.
    pub const CLASSIC: Self = Self {
        left_motor_speed: AnalogPin::P0,
        left_motor_direction: DigitalPin::P8,
        right_motor_speed: AnalogPin::P1,
        right_motor_direction: DigitalPin::P12,
        buzzer: DigitalPin::P14,
        left_line: DigitalPin::P11,
        right_line: DigitalPin::P5,
        light_select: DigitalPin::P16,
        light: AnalogPin::P2,
        neopixel: DigitalPin::P13,
        sonar: DigitalPin::P15,
    };
}

impl Default for Pinout {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Settings for a [`crate::Bitbot`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub pinout: Pinout,
    /// Farthest distance the sonar waits for, in centimeters.
    pub max_distance_cm: u32,
    /// Brightness the LED strip starts out with.
    pub brightness: u8,
}

impl Config {
    /// Round trip time of sound per centimeter of distance, in microseconds.
    pub const MICROS_PER_CM: u32 = 58;

    /// Longest echo worth waiting for given [`Config::max_distance_cm`].
    #[must_use]
    pub const fn sonar_timeout_us(&self) -> u32 {
        self.max_distance_cm.saturating_mul(Self::MICROS_PER_CM)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pinout: Pinout::CLASSIC,
            max_distance_cm: 500,
            brightness: 128,
        }
    }
}
