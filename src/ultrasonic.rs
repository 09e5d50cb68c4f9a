use crate::{
    platform::{Level, Pins, Pull},
    Bitbot, Config, Result,
};

/// Unit a sonar reading is reported in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PingUnit {
    /// The raw echo duration.
    MicroSeconds,
    Centimeters,
    Inches,
}

impl PingUnit {
    /// Round trip time of sound per inch of distance, in microseconds.
    pub const MICROS_PER_INCH: u32 = 148;

    /// Convert an echo duration to this unit.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn convert(self, echo_us: u32) -> f32 {
        let echo = echo_us as f32;
        match self {
            PingUnit::Centimeters => echo / Config::MICROS_PER_CM as f32,
            PingUnit::Inches => echo / Self::MICROS_PER_INCH as f32,
            PingUnit::MicroSeconds => echo,
        }
    }
}

impl<P: Pins> Bitbot<P> {
    /// Time the sensor is held low before triggering.
    pub const SONAR_SETTLE_US: u32 = 2;
    /// Length of the trigger pulse.
    pub const SONAR_TRIGGER_US: u32 = 10;

    /// Measures the distance to an object in front of the sensor.
    ///
    /// The trigger pulse and the echo share one pin. The wait for the echo is bounded by
    /// [`Config::sonar_timeout_us`].
    ///
    /// # Errors
    ///
    /// Propagates pin errors from the platform.
    ///
    /// # Returns
    ///
    /// Ok(Some(distance)) in `unit` if we get a response from the sensor.
    /// Ok(None) if we don't get a response from the sensor before the timeout.
    pub async fn sonar(&mut self, unit: PingUnit) -> Result<Option<f32>> {
        let pin = self.config.pinout.sonar;
        let timeout = self.config.sonar_timeout_us();

        self.pins.set_pull(pin, Pull::None)?;
        self.pins.digital_write(pin, Level::Low)?;
        self.pins.delay_us(Self::SONAR_SETTLE_US).await;
        self.pins.digital_write(pin, Level::High)?;
        self.pins.delay_us(Self::SONAR_TRIGGER_US).await;
        self.pins.digital_write(pin, Level::Low)?;

        match self.pins.pulse_in(pin, Level::High, timeout).await? {
            Some(echo) => {
                trace!("sonar echo {:?} us", echo);
                Ok(Some(unit.convert(echo)))
            }
            None => {
                debug!("sonar: no echo within {:?} us", timeout);
                Ok(None)
            }
        }
    }
}
