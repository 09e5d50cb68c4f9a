use crate::{
    platform::{Level, Pins, ANALOG_MAX},
    Bitbot, Result,
};

/// Selects which wheel motor(s) a command goes to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motor {
    Left,
    Right,
    All,
}

impl Motor {
    const fn drives_left(self) -> bool {
        matches!(self, Motor::Left | Motor::All)
    }

    const fn drives_right(self) -> bool {
        matches!(self, Motor::Right | Motor::All)
    }
}

/// The largest speed magnitude a motor accepts.
pub const MAX_SPEED: i32 = 1023;

/// Clamp a requested speed to [`MAX_SPEED`].
///
/// Speeds below `-MAX_SPEED` clamp to `+MAX_SPEED`, not `-MAX_SPEED`. Together with the reverse
/// mapping in [`MotorOutput::for_speed`] this turns an oversized reverse command into a duty of
/// zero. The behaviour is kept as it is until reviewed against the hardware.
#[must_use]
#[allow(clippy::match_same_arms)]
pub const fn clamp_speed(speed: i32) -> i32 {
    match speed {
        s if s > MAX_SPEED => MAX_SPEED,
        s if s < -MAX_SPEED => MAX_SPEED,
        s => s,
    }
}

/// What gets written to a motor driver for a speed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorOutput {
    /// Duty cycle of the speed pin. Not limited to the analog output range.
    pub duty: i32,
    /// High when reversing.
    pub direction: Level,
}

impl MotorOutput {
    /// Map a signed speed to a duty cycle and direction flag.
    ///
    /// The direction is taken from the sign of `speed` before clamping. Reversing subtracts the
    /// clamped speed from [`MAX_SPEED`].
    #[must_use]
    pub const fn for_speed(speed: i32) -> Self {
        let reverse = speed < 0;
        let speed = clamp_speed(speed);
        if reverse {
            Self {
                duty: MAX_SPEED - speed,
                direction: Level::High,
            }
        } else {
            Self {
                duty: speed,
                direction: Level::Low,
            }
        }
    }

    /// The duty saturated to what an analog pin accepts.
    #[must_use]
    pub fn analog_value(self) -> u16 {
        let max = i32::from(ANALOG_MAX);
        u16::try_from(self.duty.clamp(0, max)).unwrap_or(ANALOG_MAX)
    }
}

impl<P: Pins> Bitbot<P> {
    /// Drive motor(s) forward (positive `speed`) or in reverse (negative `speed`).
    ///
    /// # Errors
    ///
    /// Propagates pin errors from the platform.
    pub fn motor(&mut self, motor: Motor, speed: i32) -> Result<()> {
        let output = MotorOutput::for_speed(speed);
        debug!("motor {:?} speed {:?} -> {:?}", motor, speed, output);
        let value = output.analog_value();
        let pinout = self.config.pinout;

        if motor.drives_left() {
            self.pins.analog_write(pinout.left_motor_speed, value)?;
            self.pins
                .digital_write(pinout.left_motor_direction, output.direction)?;
        }

        if motor.drives_right() {
            self.pins.analog_write(pinout.right_motor_speed, value)?;
            self.pins
                .digital_write(pinout.right_motor_direction, output.direction)?;
        }
        Ok(())
    }

    /// Stop both motors.
    ///
    /// # Errors
    ///
    /// Propagates pin errors from the platform.
    pub fn stop(&mut self) -> Result<()> {
        self.motor(Motor::All, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{mock::MockPins, AnalogPin, DigitalPin};

    #[test]
    fn clamps_forward_overflow() {
        assert_eq!(clamp_speed(1024), MAX_SPEED);
        assert_eq!(clamp_speed(i32::MAX), MAX_SPEED);
        assert_eq!(clamp_speed(1023), 1023);
        assert_eq!(clamp_speed(500), 500);
    }

    // Known quirk: reverse overflow lands on the positive bound.
    #[test]
    fn clamps_reverse_overflow_to_positive_bound() {
        assert_eq!(clamp_speed(-1024), MAX_SPEED);
        assert_eq!(clamp_speed(i32::MIN), MAX_SPEED);
        assert_eq!(clamp_speed(-1023), -1023);
        assert_eq!(MotorOutput::for_speed(-2000).duty, 0);
    }

    #[test]
    fn direction_follows_sign_of_request() {
        for speed in [-5000, -1024, -1, 0, 1, 1023, 5000] {
            let expected = if speed < 0 { Level::High } else { Level::Low };
            assert_eq!(MotorOutput::for_speed(speed).direction, expected, "speed {speed}");
        }
    }

    #[test]
    fn duty_for_forward_and_reverse() {
        assert_eq!(MotorOutput::for_speed(0).duty, 0);
        assert_eq!(MotorOutput::for_speed(700).duty, 700);
        assert_eq!(MotorOutput::for_speed(4000).duty, 1023);
        assert_eq!(MotorOutput::for_speed(-500).duty, 1523);
        assert_eq!(MotorOutput::for_speed(-1023).duty, 2046);
    }

    #[test]
    fn analog_value_saturates() {
        assert_eq!(MotorOutput::for_speed(700).analog_value(), 700);
        assert_eq!(MotorOutput::for_speed(-500).analog_value(), ANALOG_MAX);
        assert_eq!(MotorOutput::for_speed(-2000).analog_value(), 0);
    }

    #[test]
    fn left_motor_only_touches_left_pins() {
        let mut bot = Bitbot::new(MockPins::new());
        bot.motor(Motor::Left, 300).unwrap();
        let pins = bot.release();
        assert_eq!(pins.analog_writes(), [(AnalogPin::P0, 300)]);
        assert_eq!(pins.digital_writes(), [(DigitalPin::P8, Level::Low)]);
    }

    #[test]
    fn right_motor_reverse() {
        let mut bot = Bitbot::new(MockPins::new());
        bot.motor(Motor::Right, -1023).unwrap();
        let pins = bot.release();
        assert_eq!(pins.analog_writes(), [(AnalogPin::P1, ANALOG_MAX)]);
        assert_eq!(pins.digital_writes(), [(DigitalPin::P12, Level::High)]);
    }

    #[test]
    fn all_motors_and_stop() {
        let mut bot = Bitbot::new(MockPins::new());
        bot.motor(Motor::All, 1023).unwrap();
        bot.stop().unwrap();
        let pins = bot.release();
        assert_eq!(
            pins.analog_writes(),
            [
                (AnalogPin::P0, 1023),
                (AnalogPin::P1, 1023),
                (AnalogPin::P0, 0),
                (AnalogPin::P1, 0),
            ]
        );
        assert_eq!(
            pins.digital_writes(),
            [
                (DigitalPin::P8, Level::Low),
                (DigitalPin::P12, Level::Low),
                (DigitalPin::P8, Level::Low),
                (DigitalPin::P12, Level::Low),
            ]
        );
    }
}
