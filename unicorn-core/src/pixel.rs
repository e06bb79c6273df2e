//! Pixel model

use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};
use unicorn_protocol::{scale_color, PIXEL_LENGTH};

/// Brightness given to pixels that were never assigned one
pub const DEFAULT_BRIGHTNESS: f32 = 1.0;

/// One LED: a straight RGB color and a multiplicative brightness
///
/// Brightness is meant to lie in `[0.0, 1.0]`. Other values are stored as
/// given and wrap when encoded (see [`unicorn_protocol::scale_channel`]).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pixel {
    /// Color before brightness scaling
    pub color: Rgb888,
    /// Brightness scale
    pub brightness: f32,
}

impl Pixel {
    /// Black at default brightness
    pub const OFF: Self = Self::new(Rgb888::BLACK, DEFAULT_BRIGHTNESS);

    /// Create a pixel
    pub const fn new(color: Rgb888, brightness: f32) -> Self {
        Self { color, brightness }
    }

    /// Create a pixel at full brightness
    pub const fn full(color: Rgb888) -> Self {
        Self::new(color, DEFAULT_BRIGHTNESS)
    }

    /// Wire bytes (R, G, B) for this pixel
    pub fn encode(&self) -> [u8; PIXEL_LENGTH] {
        scale_color(self.color, self.brightness)
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::OFF
    }
}

impl From<Pixel> for (Rgb888, f32) {
    fn from(pixel: Pixel) -> Self {
        (pixel.color, pixel.brightness)
    }
}
