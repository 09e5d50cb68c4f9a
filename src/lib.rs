#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub use bitbot::*;
pub use config::*;
pub use error::*;
pub use light_sensors::*;
pub use neopixel::{rgb, NeoPixelColor, Strip};
pub use ultrasonic::*;
pub use wheels::*;

mod bitbot;

mod config;

mod error;

mod wheels;

mod ultrasonic;

mod light_sensors;

pub mod neopixel;

mod buzzer;

pub mod platform;
