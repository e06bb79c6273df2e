//! `embedded-graphics` drawing surface
//!
//! Drawing changes colors only; each pixel keeps the brightness it already
//! had. Points outside the matrix are clipped. In immediate mode one frame
//! is sent per draw call, not per pixel.

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::Rgb888;
use embedded_graphics_core::Pixel;
use unicorn_hal::SpiBus;
use unicorn_protocol::{COLUMNS, ROWS};

use crate::error::Error;
use crate::session::UnicornHatHd;

impl<B: SpiBus> OriginDimensions for UnicornHatHd<B> {
    /// Matrix geometry, 16×16 whether or not the session is still open
    fn size(&self) -> Size {
        Size::new(ROWS as u32, COLUMNS as u32)
    }
}

impl<B: SpiBus> DrawTarget for UnicornHatHd<B> {
    type Color = Rgb888;
    type Error = Error<B::Error>;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.paint(pixels.into_iter().filter_map(|Pixel(point, color)| {
            let x = usize::try_from(point.x).ok()?;
            let y = usize::try_from(point.y).ok()?;
            (x < ROWS && y < COLUMNS).then_some((x, y, color))
        }))
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.paint((0..ROWS).flat_map(|x| (0..COLUMNS).map(move |y| (x, y, color))))
    }
}

impl<B: SpiBus> UnicornHatHd<B> {
    /// Recolor in-bounds pixels, then send at most one frame
    fn paint<I>(&mut self, pixels: I) -> Result<(), Error<B::Error>>
    where
        I: Iterator<Item = (usize, usize, Rgb888)>,
    {
        let grid = self.grid_mut()?;
        for (x, y, color) in pixels {
            grid.set_color(x, y, color)?;
        }
        self.changed()
    }
}
