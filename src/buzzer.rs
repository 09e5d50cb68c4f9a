//! Contains the operation switching the bitbot buzzer on and off.

use crate::{
    platform::{Level, Pins},
    Bitbot, Result,
};

impl<P: Pins> Bitbot<P> {
    /// Sound the buzzer when `flag` is non-zero, silence it when zero.
    ///
    /// # Errors
    ///
    /// Propagates pin errors from the platform.
    pub fn buzz(&mut self, flag: i32) -> Result<()> {
        let level = Level::from(flag != 0);
        self.pins.digital_write(self.config.pinout.buzzer, level)
    }
}
