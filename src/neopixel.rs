//! Contains the LED strip buffer and the bitbot LED operations.

use smart_leds::{
    brightness,
    hsv::{hsv2rgb, Hsv},
    RGB8,
};

use crate::{
    bitbot::STRIP_LEN,
    platform::{PixelWriter, Pins},
    Bitbot, Result,
};

/// Pack red, green and blue channels into a `0xRRGGBB` colour.
#[must_use]
#[allow(clippy::cast_lossless)]
pub const fn rgb(red: u8, green: u8, blue: u8) -> u32 {
    ((red as u32) << 16) | ((green as u32) << 8) | blue as u32
}

/// Split a `0xRRGGBB` colour into channels. Bits above the blue, green and red bytes are ignored.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn unpack(rgb: u32) -> RGB8 {
    RGB8 {
        r: (rgb >> 16) as u8,
        g: (rgb >> 8) as u8,
        b: rgb as u8,
    }
}

/// Well known colours.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NeoPixelColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Indigo,
    Violet,
    Purple,
    White,
    Black,
}

impl NeoPixelColor {
    #[must_use]
    pub const fn rgb(self) -> u32 {
        match self {
            NeoPixelColor::Red => 0xFF_00_00,
            NeoPixelColor::Orange => 0xFF_A5_00,
            NeoPixelColor::Yellow => 0xFF_FF_00,
            NeoPixelColor::Green => 0x00_FF_00,
            NeoPixelColor::Blue => 0x00_00_FF,
            NeoPixelColor::Indigo => 0x4B_00_82,
            NeoPixelColor::Violet => 0x8A_2B_E2,
            NeoPixelColor::Purple => 0xFF_00_FF,
            NeoPixelColor::White => 0xFF_FF_FF,
            NeoPixelColor::Black => 0x00_00_00,
        }
    }
}

impl From<NeoPixelColor> for u32 {
    fn from(color: NeoPixelColor) -> Self {
        color.rgb()
    }
}

/// A strip of `N` addressable LEDs.
///
/// Pixel changes only land in the buffer. [`Strip::show`] sends the buffer, scaled by the
/// current brightness, to the writer.
pub struct Strip<W, const N: usize> {
    writer: W,
    pixels: [RGB8; N],
    brightness: u8,
}

impl<W: PixelWriter, const N: usize> Strip<W, N> {
    #[must_use]
    pub fn new(writer: W, brightness: u8) -> Self {
        Self {
            writer,
            pixels: [RGB8::default(); N],
            brightness,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    #[must_use]
    pub fn pixels(&self) -> &[RGB8; N] {
        &self.pixels
    }

    #[must_use]
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Set the brightness used by the next [`Strip::show`]; 255 is full brightness.
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Set every pixel to `rgb`.
    pub fn set_color(&mut self, rgb: u32) {
        self.pixels.fill(unpack(rgb));
    }

    /// Set the pixel at `offset`. Offsets outside the strip are ignored.
    pub fn set_pixel_color(&mut self, offset: i32, rgb: u32) {
        if let Some(pixel) = usize::try_from(offset)
            .ok()
            .and_then(|i| self.pixels.get_mut(i))
        {
            *pixel = unpack(rgb);
        }
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.pixels.fill(RGB8::default());
    }

    /// Fill the strip with hues running from `start_hue` to `end_hue`, in degrees.
    pub fn set_rainbow(&mut self, start_hue: u16, end_hue: u16) {
        let start = i32::from(start_hue);
        let span = i32::from(end_hue) - start;
        let len = i32::try_from(N).unwrap_or(i32::MAX).max(1);
        for (i, pixel) in (0..).zip(self.pixels.iter_mut()) {
            let degrees = (start + span * i / len).rem_euclid(360);
            let hue = u8::try_from(degrees * 256 / 360).unwrap_or(u8::MAX);
            *pixel = hsv2rgb(Hsv {
                hue,
                sat: 255,
                val: 255,
            });
        }
    }

    /// Move pixels `offset` places towards the end of the strip (backwards for negative offsets),
    /// turning off the pixels left behind.
    pub fn shift(&mut self, offset: i32) {
        let by = usize::try_from(offset.unsigned_abs()).unwrap_or(N).min(N);
        if offset >= 0 {
            self.pixels.copy_within(..N - by, by);
            self.pixels[..by].fill(RGB8::default());
        } else {
            self.pixels.copy_within(by.., 0);
            self.pixels[N - by..].fill(RGB8::default());
        }
    }

    /// Move pixels `offset` places towards the end of the strip, wrapping around.
    pub fn rotate(&mut self, offset: i32) {
        if N == 0 {
            return;
        }
        let len = i64::try_from(N).unwrap_or(i64::MAX);
        let by = usize::try_from(i64::from(offset).rem_euclid(len)).unwrap_or(0);
        self.pixels.rotate_right(by);
    }

    /// Send the buffer to the strip.
    ///
    /// # Errors
    ///
    /// Propagates writer errors.
    pub async fn show(&mut self) -> Result<()> {
        let mut frame = [RGB8::default(); N];
        for (dst, src) in frame
            .iter_mut()
            .zip(brightness(self.pixels.iter().copied(), self.brightness))
        {
            *dst = src;
        }
        self.writer.write(&frame).await
    }

    /// Set every pixel to `rgb` and show it.
    ///
    /// # Errors
    ///
    /// Propagates writer errors.
    pub async fn show_color(&mut self, rgb: u32) -> Result<()> {
        self.set_color(rgb);
        self.show().await
    }

    /// Fill the strip with a rainbow and show it.
    ///
    /// # Errors
    ///
    /// Propagates writer errors.
    pub async fn show_rainbow(&mut self, start_hue: u16, end_hue: u16) -> Result<()> {
        self.set_rainbow(start_hue, end_hue);
        self.show().await
    }
}

impl<P: Pins> Bitbot<P> {
    /// The LED strip, created on first use.
    ///
    /// # Errors
    ///
    /// Fails if the platform cannot provide the strip output. Nothing is stored in that case, so
    /// the next call tries again.
    pub fn neo(&mut self) -> Result<&mut Strip<P::Pixels, STRIP_LEN>> {
        let strip = match self.strip.take() {
            Some(strip) => strip,
            None => {
                let pin = self.config.pinout.neopixel;
                let writer = self.pins.neopixel(pin, STRIP_LEN)?;
                info!("led strip created on {:?}", pin);
                Strip::new(writer, self.config.brightness)
            }
        };
        Ok(self.strip.insert(strip))
    }

    /// Show `rgb` on all LEDs.
    ///
    /// # Errors
    ///
    /// Propagates strip errors.
    pub async fn neo_show_color(&mut self, rgb: u32) -> Result<()> {
        self.neo()?.show_color(rgb).await
    }

    /// Set the LED at `offset` to `rgb`, to be shown by the next [`Bitbot::neo_show`].
    ///
    /// # Errors
    ///
    /// Propagates strip errors.
    pub fn neo_set_pixel_color(&mut self, offset: i32, rgb: u32) -> Result<()> {
        self.neo()?.set_pixel_color(offset, rgb);
        Ok(())
    }

    /// Show the LEDs.
    ///
    /// # Errors
    ///
    /// Propagates strip errors.
    pub async fn neo_show(&mut self) -> Result<()> {
        self.neo()?.show().await
    }

    /// Turn all LEDs off in the buffer.
    ///
    /// # Errors
    ///
    /// Propagates strip errors.
    pub fn neo_clear(&mut self) -> Result<()> {
        self.neo()?.clear();
        Ok(())
    }

    /// Show a rainbow across all LEDs.
    ///
    /// # Errors
    ///
    /// Propagates strip errors.
    pub async fn neo_show_rainbow(&mut self) -> Result<()> {
        self.neo()?.show_rainbow(1, 360).await
    }

    /// Shift the LEDs forward by one, turning the first one off.
    ///
    /// # Errors
    ///
    /// Propagates strip errors.
    pub fn neo_shift(&mut self) -> Result<()> {
        self.neo()?.shift(1);
        Ok(())
    }

    /// Rotate the LEDs forward by one.
    ///
    /// # Errors
    ///
    /// Propagates strip errors.
    pub fn neo_rotate(&mut self) -> Result<()> {
        self.neo()?.rotate(1);
        Ok(())
    }

    /// Set the brightness of the strip.
    ///
    /// # Errors
    ///
    /// Propagates strip errors.
    pub fn neo_brightness(&mut self, brightness: u8) -> Result<()> {
        self.neo()?.set_brightness(brightness);
        Ok(())
    }
}
