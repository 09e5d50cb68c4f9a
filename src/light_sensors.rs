//! Contains utilities for reading the line and light sensors on the bitbot.

use crate::{
    platform::{Level, Pins},
    Bitbot, Result,
};

/// Selects one of the two line sensors under the bitbot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineSensor {
    Left,
    Right,
}

/// Selects one of the two light sensors on the bitbot.
///
/// Both sensors share one analog input. A select pin decides which of them is routed to it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightSensor {
    Left,
    Right,
}

impl LightSensor {
    const fn select_level(self) -> Level {
        match self {
            LightSensor::Left => Level::Low,
            LightSensor::Right => Level::High,
        }
    }
}

impl<P: Pins> Bitbot<P> {
    /// Read the digital output of a line sensor.
    ///
    /// # Errors
    ///
    /// Propagates pin errors from the platform.
    pub fn read_line(&mut self, sensor: LineSensor) -> Result<Level> {
        let pin = match sensor {
            LineSensor::Left => self.config.pinout.left_line,
            LineSensor::Right => self.config.pinout.right_line,
        };
        self.pins.digital_read(pin)
    }

    /// Read a light sensor, in `0..=1023`.
    ///
    /// The meaning of the values are not documented, but correlate with the intensity of the
    /// light detected.
    ///
    /// # Errors
    ///
    /// Propagates pin errors from the platform.
    pub async fn read_light(&mut self, sensor: LightSensor) -> Result<u16> {
        let pinout = self.config.pinout;
        self.pins
            .digital_write(pinout.light_select, sensor.select_level())?;
        let value = self.pins.analog_read(pinout.light).await?;
        trace!("light {:?}: {:?}", sensor, value);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;
    use crate::platform::{
        mock::{Event, MockPins},
        AnalogPin, DigitalPin,
    };

    #[test]
    fn line_sensors_read_their_own_pins() {
        let mut pins = MockPins::new();
        pins.inputs = vec![(DigitalPin::P11, Level::High), (DigitalPin::P5, Level::Low)];
        let mut bot = Bitbot::new(pins);

        assert_eq!(bot.read_line(LineSensor::Left).unwrap(), Level::High);
        assert_eq!(bot.read_line(LineSensor::Right).unwrap(), Level::Low);
        assert_eq!(
            bot.release().events,
            [
                Event::DigitalRead(DigitalPin::P11),
                Event::DigitalRead(DigitalPin::P5),
            ]
        );
    }

    #[test]
    fn light_sensor_selects_before_reading() {
        let mut pins = MockPins::new();
        pins.analog_inputs = vec![(AnalogPin::P2, 612)];
        let mut bot = Bitbot::new(pins);

        assert_eq!(block_on(bot.read_light(LightSensor::Left)).unwrap(), 612);
        assert_eq!(block_on(bot.read_light(LightSensor::Right)).unwrap(), 612);
        assert_eq!(
            bot.release().events,
            [
                Event::DigitalWrite(DigitalPin::P16, Level::Low),
                Event::AnalogRead(AnalogPin::P2),
                Event::DigitalWrite(DigitalPin::P16, Level::High),
                Event::AnalogRead(AnalogPin::P2),
            ]
        );
    }
}
