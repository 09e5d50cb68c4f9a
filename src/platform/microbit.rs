//! [`Pins`] for a BBC micro:bit v2 plugged into a classic bitbot.
//!
//! Only the pins the bitbot uses are wired up, in the roles [`crate::Pinout::CLASSIC`] gives
//! them. Anything else reports [`Error::UnsupportedDigitalPin`] or
//! [`Error::UnsupportedAnalogPin`].

use embassy_futures::select::{select, Either};
use embassy_nrf::{
    gpio::{self, AnyPin, Flex, Input, Output, OutputDrive, Pin as _},
    interrupt,
    peripherals::{PWM0, PWM1},
    pwm::{
        self, Prescaler, SequenceConfig, SequenceLoad, SequencePwm, SimplePwm, SingleSequenceMode,
        SingleSequencer,
    },
    saadc::{self, ChannelConfig, InterruptHandler, Saadc},
};
use embassy_time::{Duration, Instant, Timer};
use microbit_bsp::Microbit;
use smart_leds::RGB8;

use super::{AnalogPin, DigitalPin, Level, PixelWriter, Pins, Pull, ANALOG_MAX};
use crate::{Error, Result, STRIP_LEN};

/// Pins of the micro:bit as wired on the bitbot.
pub struct MicrobitPins {
    motors: SimplePwm<'static, PWM0>,
    left_direction: Output<'static, AnyPin>,
    right_direction: Output<'static, AnyPin>,
    buzzer: Output<'static, AnyPin>,
    light_select: Output<'static, AnyPin>,
    left_line: Input<'static, AnyPin>,
    right_line: Input<'static, AnyPin>,
    sonar: Flex<'static, AnyPin>,
    sonar_pull: Pull,
    light: Saadc<'static, 1>,
    neopixel: Option<(PWM1, AnyPin)>,
}

impl MicrobitPins {
    /// Core clock cycles per microsecond.
    const CYCLES_PER_US: u32 = 64;
    /// Delays shorter than this are busy waited; the timer ticks at 32768 Hz.
    const BUSY_WAIT_LIMIT_US: u32 = 1_000;

    /// Take the pins the bitbot uses from `board`.
    ///
    /// # Arguments
    ///
    /// * `board`: The micro:bit peripherals.
    /// * `irq`: 'Proof' of interrupt handler mapping.
    ///
    /// returns: [`MicrobitPins`]
    pub async fn new(
        board: Microbit,
        irq: impl interrupt::typelevel::Binding<interrupt::typelevel::SAADC, InterruptHandler> + 'static,
    ) -> Self {
        let motors = SimplePwm::new_2ch(board.pwm0, board.p0, board.p1);
        motors.set_prescaler(Prescaler::Div1);
        motors.set_max_duty(ANALOG_MAX);
        motors.enable();

        let output = |pin: AnyPin| Output::new(pin, gpio::Level::Low, OutputDrive::Standard);

        let mut config = saadc::Config::default();
        config.resolution = saadc::Resolution::_10BIT;
        let light = Saadc::new(
            board.saadc,
            irq,
            config,
            [ChannelConfig::single_ended(board.p2)],
        );
        light.calibrate().await;

        Self {
            motors,
            left_direction: output(board.p8.degrade()),
            right_direction: output(board.p12.degrade()),
            buzzer: output(board.p14.degrade()),
            light_select: output(board.p16.degrade()),
            left_line: board.btn_b,
            right_line: board.btn_a,
            sonar: Flex::new(board.p15.degrade()),
            sonar_pull: Pull::None,
            light,
            neopixel: Some((board.pwm1, board.p13.degrade())),
        }
    }

    fn output(&mut self, pin: DigitalPin) -> Result<&mut Output<'static, AnyPin>> {
        match pin {
            DigitalPin::P8 => Ok(&mut self.left_direction),
            DigitalPin::P12 => Ok(&mut self.right_direction),
            DigitalPin::P14 => Ok(&mut self.buzzer),
            DigitalPin::P16 => Ok(&mut self.light_select),
            _ => Err(Error::UnsupportedDigitalPin(pin)),
        }
    }

    fn sonar_as_input(&mut self) {
        self.sonar.set_as_input(match self.sonar_pull {
            Pull::None => gpio::Pull::None,
            Pull::Up => gpio::Pull::Up,
            Pull::Down => gpio::Pull::Down,
        });
    }
}

impl Pins for MicrobitPins {
    type Pixels = Ws2812;

    fn digital_write(&mut self, pin: DigitalPin, level: Level) -> Result<()> {
        let level = gpio::Level::from(level.is_high());
        if pin == DigitalPin::P15 {
            self.sonar.set_level(level);
            self.sonar.set_as_output(OutputDrive::HighDrive);
        } else {
            self.output(pin)?.set_level(level);
        }
        Ok(())
    }

    fn digital_read(&mut self, pin: DigitalPin) -> Result<Level> {
        let high = match pin {
            DigitalPin::P5 => self.right_line.is_high(),
            DigitalPin::P11 => self.left_line.is_high(),
            DigitalPin::P15 => {
                self.sonar_as_input();
                self.sonar.is_high()
            }
            _ => return Err(Error::UnsupportedDigitalPin(pin)),
        };
        Ok(Level::from(high))
    }

    fn analog_write(&mut self, pin: AnalogPin, value: u16) -> Result<()> {
        let channel = match pin {
            AnalogPin::P0 => 0,
            AnalogPin::P1 => 1,
            _ => return Err(Error::UnsupportedAnalogPin(pin)),
        };
        self.motors.set_duty(channel, value.min(ANALOG_MAX));
        Ok(())
    }

    async fn analog_read(&mut self, pin: AnalogPin) -> Result<u16> {
        if pin != AnalogPin::P2 {
            return Err(Error::UnsupportedAnalogPin(pin));
        }
        let mut buffer = [0; 1];
        self.light.sample(&mut buffer).await;
        Ok(u16::try_from(buffer[0].clamp(0, 1023)).unwrap_or(0))
    }

    fn set_pull(&mut self, pin: DigitalPin, pull: Pull) -> Result<()> {
        if pin != DigitalPin::P15 {
            return Err(Error::UnsupportedDigitalPin(pin));
        }
        self.sonar_pull = pull;
        Ok(())
    }

    async fn delay_us(&mut self, micros: u32) {
        if micros < Self::BUSY_WAIT_LIMIT_US {
            cortex_m::asm::delay(micros * Self::CYCLES_PER_US);
        } else {
            Timer::after_micros(u64::from(micros)).await;
        }
    }

    async fn pulse_in(
        &mut self,
        pin: DigitalPin,
        level: Level,
        timeout_us: u32,
    ) -> Result<Option<u32>> {
        if pin != DigitalPin::P15 {
            return Err(Error::UnsupportedDigitalPin(pin));
        }
        self.sonar_as_input();
        let timeout = Duration::from_micros(u64::from(timeout_us));
        match measure_pulse(&mut self.sonar, level, timeout).await {
            PulseResult::Pulse(duration) => {
                Ok(Some(u32::try_from(duration.as_micros()).unwrap_or(u32::MAX)))
            }
            PulseResult::NoLeadingEdge => {
                trace!("pulse_in: no leading edge");
                Ok(None)
            }
            PulseResult::NoTrailingEdge => {
                trace!("pulse_in: pulse longer than timeout");
                Ok(None)
            }
        }
    }

    fn neopixel(&mut self, pin: DigitalPin, len: usize) -> Result<Self::Pixels> {
        if pin != DigitalPin::P13 {
            return Err(Error::UnsupportedDigitalPin(pin));
        }
        if len > STRIP_LEN {
            warn!("only {} of {} pixels will be driven", STRIP_LEN, len);
        }
        let (pwm, pin) = self.neopixel.take().ok_or(Error::StripUnavailable)?;
        Ws2812::new(pwm, pin)
    }
}

enum PulseResult {
    Pulse(Duration),
    NoLeadingEdge,
    NoTrailingEdge,
}

async fn measure_pulse(pin: &mut Flex<'_, AnyPin>, level: Level, timeout: Duration) -> PulseResult {
    let edge_timeout = Timer::after(timeout);
    if let Either::Second(()) = match level {
        Level::Low => select(pin.wait_for_falling_edge(), edge_timeout).await,
        Level::High => select(pin.wait_for_rising_edge(), edge_timeout).await,
    } {
        return PulseResult::NoLeadingEdge;
    };

    let begin = Instant::now();
    let pulse_timeout = Timer::after(timeout);

    if let Either::Second(()) = match level {
        Level::Low => select(pin.wait_for_rising_edge(), pulse_timeout).await,
        Level::High => select(pin.wait_for_falling_edge(), pulse_timeout).await,
    } {
        return PulseResult::NoTrailingEdge;
    }

    PulseResult::Pulse(begin.elapsed())
}

/// WS2812 output driven by a PWM sequence, one duty word per bit.
pub struct Ws2812 {
    pwm: SequencePwm<'static, PWM1>,
    words: [u16; Self::WORDS],
}

impl Ws2812 {
    /// 1.25 us bit period at 16 MHz.
    const PERIOD: u16 = 20;
    const T0H: u16 = 0x8000 | 7;
    const T1H: u16 = 0x8000 | 13;
    const RESET: u16 = 0x8000;
    /// Low time after the frame, in bit periods. At least 50 us.
    const RESET_PERIODS: u32 = 799;
    const WORDS: usize = STRIP_LEN * 24 + 1;
    /// Long enough for a whole frame plus the reset time.
    const FRAME_TIME: Duration = Duration::from_millis(1);

    fn new(pwm: PWM1, pin: AnyPin) -> Result<Self> {
        let mut config = pwm::Config::default();
        config.sequence_load = SequenceLoad::Common;
        config.prescaler = Prescaler::Div1;
        config.max_duty = Self::PERIOD;
        let pwm = SequencePwm::new_1ch(pwm, pin, config).map_err(|_| Error::StripWrite)?;
        Ok(Self {
            pwm,
            words: [Self::RESET; Self::WORDS],
        })
    }
}

impl PixelWriter for Ws2812 {
    async fn write(&mut self, pixels: &[RGB8]) -> Result<()> {
        let mut n = 0;
        for pixel in pixels.iter().take(STRIP_LEN) {
            // The strip expects green first.
            for byte in [pixel.g, pixel.r, pixel.b] {
                for bit in (0..8).rev() {
                    self.words[n] = if (byte >> bit) & 1 == 1 {
                        Self::T1H
                    } else {
                        Self::T0H
                    };
                    n += 1;
                }
            }
        }
        self.words[n] = Self::RESET;
        n += 1;

        let mut config = SequenceConfig::default();
        config.end_delay = Self::RESET_PERIODS;
        let sequencer = SingleSequencer::new(&mut self.pwm, &self.words[..n], config);
        sequencer
            .start(SingleSequenceMode::Times(1))
            .map_err(|_| Error::StripWrite)?;
        Timer::after(Self::FRAME_TIME).await;
        Ok(())
    }
}
