//! Recording pins for host tests.

use std::{cell::RefCell, rc::Rc, vec::Vec};

use smart_leds::RGB8;

use super::{AnalogPin, DigitalPin, Level, PixelWriter, Pins, Pull};
use crate::{Error, Result};

/// Every call made against [`MockPins`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    DigitalWrite(DigitalPin, Level),
    DigitalRead(DigitalPin),
    AnalogWrite(AnalogPin, u16),
    AnalogRead(AnalogPin),
    SetPull(DigitalPin, Pull),
    Delay(u32),
    PulseIn(DigitalPin, Level, u32),
    Neopixel(DigitalPin, usize),
}

/// Pins that record calls and answer reads from preset values.
#[derive(Debug, Default)]
pub struct MockPins {
    pub events: Vec<Event>,
    pub inputs: Vec<(DigitalPin, Level)>,
    pub analog_inputs: Vec<(AnalogPin, u16)>,
    pub echo: Option<u32>,
    pub frames: Rc<RefCell<Vec<Vec<RGB8>>>>,
    pub fail_neopixel: bool,
}

impl MockPins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_echo(echo: Option<u32>) -> Self {
        Self {
            echo,
            ..Self::default()
        }
    }

    pub fn neopixel_claims(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Neopixel(..)))
            .count()
    }

    pub fn analog_writes(&self) -> Vec<(AnalogPin, u16)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::AnalogWrite(pin, value) => Some((*pin, *value)),
                _ => None,
            })
            .collect()
    }

    pub fn digital_writes(&self) -> Vec<(DigitalPin, Level)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::DigitalWrite(pin, level) => Some((*pin, *level)),
                _ => None,
            })
            .collect()
    }
}

impl Pins for MockPins {
    type Pixels = MockPixels;

    fn digital_write(&mut self, pin: DigitalPin, level: Level) -> Result<()> {
        self.events.push(Event::DigitalWrite(pin, level));
        Ok(())
    }

    fn digital_read(&mut self, pin: DigitalPin) -> Result<Level> {
        self.events.push(Event::DigitalRead(pin));
        Ok(self
            .inputs
            .iter()
            .find(|(p, _)| *p == pin)
            .map_or(Level::Low, |(_, level)| *level))
    }

    fn analog_write(&mut self, pin: AnalogPin, value: u16) -> Result<()> {
        self.events.push(Event::AnalogWrite(pin, value));
        Ok(())
    }

    async fn analog_read(&mut self, pin: AnalogPin) -> Result<u16> {
        self.events.push(Event::AnalogRead(pin));
        Ok(self
            .analog_inputs
            .iter()
            .find(|(p, _)| *p == pin)
            .map_or(0, |(_, value)| *value))
    }

    fn set_pull(&mut self, pin: DigitalPin, pull: Pull) -> Result<()> {
        self.events.push(Event::SetPull(pin, pull));
        Ok(())
    }

    async fn delay_us(&mut self, micros: u32) {
        self.events.push(Event::Delay(micros));
    }

    async fn pulse_in(
        &mut self,
        pin: DigitalPin,
        level: Level,
        timeout_us: u32,
    ) -> Result<Option<u32>> {
        self.events.push(Event::PulseIn(pin, level, timeout_us));
        Ok(self.echo.filter(|d| *d <= timeout_us))
    }

    fn neopixel(&mut self, pin: DigitalPin, len: usize) -> Result<Self::Pixels> {
        self.events.push(Event::Neopixel(pin, len));
        if self.fail_neopixel {
            return Err(Error::StripUnavailable);
        }
        Ok(MockPixels {
            frames: Rc::clone(&self.frames),
        })
    }
}

/// Pixel sink that keeps every frame it was given.
#[derive(Debug, Default)]
pub struct MockPixels {
    pub frames: Rc<RefCell<Vec<Vec<RGB8>>>>,
}

impl PixelWriter for MockPixels {
    async fn write(&mut self, pixels: &[RGB8]) -> Result<()> {
        self.frames.borrow_mut().push(pixels.to_vec());
        Ok(())
    }
}
