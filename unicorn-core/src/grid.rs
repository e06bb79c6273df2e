//! Pixel store
//!
//! The authoritative in-memory image of the matrix. Every write goes
//! through a bounds check; a rejected write leaves the grid untouched.

use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};
use rand_core::RngCore;
use unicorn_protocol::{FramePayload, COLUMNS, NUMBER_OF_PIXELS, ROWS};

use crate::pixel::{Pixel, DEFAULT_BRIGHTNESS};

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Row axis, `0..ROWS`
    X,
    /// Column axis, `0..COLUMNS`
    Y,
}

impl Axis {
    /// Exclusive upper bound for this axis
    pub const fn limit(self) -> usize {
        match self {
            Axis::X => ROWS,
            Axis::Y => COLUMNS,
        }
    }
}

/// A coordinate fell outside the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRange {
    /// Offending axis (x is checked first)
    pub axis: Axis,
    /// Rejected value
    pub value: usize,
}

impl core::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self.axis {
            Axis::X => "x",
            Axis::Y => "y",
        };
        write!(
            f,
            "{} = {} is outside 0..{}",
            name,
            self.value,
            self.axis.limit()
        )
    }
}

/// 16×16 grid of pixels
///
/// Indexed `(x, y)` with `x` selecting the row and `y` the column, the same
/// order the device scans its LEDs.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    cells: [[Pixel; COLUMNS]; ROWS],
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelGrid {
    /// Create a grid with every pixel black at default brightness
    pub const fn new() -> Self {
        Self {
            cells: [[Pixel::OFF; COLUMNS]; ROWS],
        }
    }

    fn check(x: usize, y: usize) -> Result<(), OutOfRange> {
        if x >= ROWS {
            return Err(OutOfRange {
                axis: Axis::X,
                value: x,
            });
        }
        if y >= COLUMNS {
            return Err(OutOfRange {
                axis: Axis::Y,
                value: y,
            });
        }
        Ok(())
    }

    /// Set color and brightness of one pixel together
    pub fn set_pixel(
        &mut self,
        x: usize,
        y: usize,
        color: Rgb888,
        brightness: f32,
    ) -> Result<(), OutOfRange> {
        Self::check(x, y)?;
        self.cells[x][y] = Pixel::new(color, brightness);
        Ok(())
    }

    /// Read one pixel
    pub fn pixel(&self, x: usize, y: usize) -> Result<Pixel, OutOfRange> {
        Self::check(x, y)?;
        Ok(self.cells[x][y])
    }

    /// Set only the color of one pixel, keeping its brightness
    ///
    /// This is the drawing-surface view of the grid.
    pub fn set_color(&mut self, x: usize, y: usize, color: Rgb888) -> Result<(), OutOfRange> {
        Self::check(x, y)?;
        self.cells[x][y].color = color;
        Ok(())
    }

    /// Read only the color of one pixel
    pub fn color(&self, x: usize, y: usize) -> Result<Rgb888, OutOfRange> {
        self.pixel(x, y).map(|pixel| pixel.color)
    }

    /// Set every pixel to the same color and brightness
    pub fn fill(&mut self, color: Rgb888, brightness: f32) {
        for row in self.cells.iter_mut() {
            row.fill(Pixel::new(color, brightness));
        }
    }

    /// Turn every pixel off
    ///
    /// Colors become black and brightness returns to
    /// [`DEFAULT_BRIGHTNESS`], so the grid equals a freshly created one.
    pub fn clear(&mut self) {
        self.fill(Rgb888::BLACK, DEFAULT_BRIGHTNESS);
    }

    /// Give every pixel an independent random color and brightness
    ///
    /// Each channel is uniform over `0..=255`, brightness uniform over
    /// `[0.0, 1.0)`.
    pub fn random_fill<R: RngCore + ?Sized>(&mut self, rng: &mut R) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                let mut channels = [0u8; 3];
                rng.fill_bytes(&mut channels);
                let brightness = unit_interval(rng.next_u32());
                *cell = Pixel::new(Rgb888::new(channels[0], channels[1], channels[2]), brightness);
            }
        }
    }

    /// All pixels in wire order (x outer, y inner)
    pub fn pixels(&self) -> impl Iterator<Item = &Pixel> + '_ {
        self.cells.iter().flat_map(|row| row.iter())
    }

    /// Number of pixels in the grid
    pub const fn len(&self) -> usize {
        NUMBER_OF_PIXELS
    }

    /// Always false; the grid has a fixed size
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Encode the whole grid into a wire payload
    pub fn encode(&self) -> FramePayload {
        FramePayload::from_fn(|x, y| self.cells[x][y].into())
    }
}

/// Map 24 random bits onto `[0.0, 1.0)` without rounding up to 1.0
fn unit_interval(bits: u32) -> f32 {
    const SCALE: f32 = 1.0 / (1u32 << 24) as f32;
    (bits >> 8) as f32 * SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_grid_is_dark() {
        let grid = PixelGrid::new();
        assert_eq!(grid.pixels().count(), 256);
        assert!(grid.pixels().all(|p| *p == Pixel::OFF));
        assert!(grid.encode().as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_set_get_roundtrip() {
        let mut grid = PixelGrid::new();
        let color = Rgb888::new(12, 34, 56);
        grid.set_pixel(7, 9, color, 0.25).unwrap();

        assert_eq!(grid.pixel(7, 9), Ok(Pixel::new(color, 0.25)));
        assert_eq!(grid.color(7, 9), Ok(color));
        assert_eq!(grid.pixel(9, 7), Ok(Pixel::OFF));
    }

    #[test]
    fn test_out_of_range_per_axis() {
        let mut grid = PixelGrid::new();

        assert_eq!(
            grid.set_pixel(16, 0, Rgb888::WHITE, 1.0),
            Err(OutOfRange {
                axis: Axis::X,
                value: 16
            })
        );
        assert_eq!(
            grid.set_pixel(0, 16, Rgb888::WHITE, 1.0),
            Err(OutOfRange {
                axis: Axis::Y,
                value: 16
            })
        );
        assert_eq!(
            grid.pixel(3, 99),
            Err(OutOfRange {
                axis: Axis::Y,
                value: 99
            })
        );
        assert_eq!(grid, PixelGrid::new());
    }

    #[test]
    fn test_out_of_range_display() {
        let err = OutOfRange {
            axis: Axis::Y,
            value: 20,
        };
        assert_eq!(err.to_string(), "y = 20 is outside 0..16");
    }

    #[test]
    fn test_set_color_keeps_brightness() {
        let mut grid = PixelGrid::new();
        grid.set_pixel(1, 1, Rgb888::RED, 0.5).unwrap();
        grid.set_color(1, 1, Rgb888::GREEN).unwrap();

        assert_eq!(grid.pixel(1, 1), Ok(Pixel::new(Rgb888::GREEN, 0.5)));
        assert!(grid.set_color(1, 16, Rgb888::GREEN).is_err());
    }

    #[test]
    fn test_fill_then_encode() {
        let mut grid = PixelGrid::new();
        grid.fill(Rgb888::new(240, 255, 255), 0.5);

        assert!(grid
            .pixels()
            .all(|p| *p == Pixel::new(Rgb888::new(240, 255, 255), 0.5)));
        for triple in grid.encode().as_bytes().chunks_exact(3) {
            assert_eq!(triple, &[120, 127, 127]);
        }
    }

    #[test]
    fn test_clear_resets_color_and_brightness() {
        let mut grid = PixelGrid::new();
        grid.fill(Rgb888::WHITE, 0.3);
        grid.clear();

        assert_eq!(grid, PixelGrid::new());
        assert!(grid.encode().as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_black_zero_brightness_encodes_blank() {
        let mut grid = PixelGrid::new();
        grid.fill(Rgb888::BLACK, 0.0);
        assert_eq!(grid.encode(), FramePayload::blank());
    }

    #[test]
    fn test_scenario_offsets() {
        let mut grid = PixelGrid::new();
        grid.set_pixel(0, 0, Rgb888::new(255, 0, 0), 1.0).unwrap();
        grid.set_pixel(3, 5, Rgb888::new(200, 100, 50), 0.5).unwrap();

        let payload = grid.encode();
        let bytes = payload.as_bytes();
        assert_eq!(&bytes[..3], &[255, 0, 0]);

        let offset = (3 * 16 + 5) * 3;
        assert_eq!(&bytes[offset..offset + 3], &[100, 50, 25]);

        let lit = bytes.iter().filter(|&&b| b != 0).count();
        assert_eq!(lit, 4);
    }

    #[test]
    fn test_random_fill_is_seeded() {
        let mut a = PixelGrid::new();
        let mut b = PixelGrid::new();
        a.random_fill(&mut SmallRng::seed_from_u64(42));
        b.random_fill(&mut SmallRng::seed_from_u64(42));

        assert_eq!(a, b);
        assert_ne!(a, PixelGrid::new());
        assert!(a.pixels().all(|p| (0.0..1.0).contains(&p.brightness)));
    }

    #[test]
    fn test_unit_interval_bounds() {
        assert_eq!(unit_interval(0), 0.0);
        assert!(unit_interval(u32::MAX) < 1.0);
        assert_eq!(unit_interval(0x8000_0000), 0.5);
    }

    proptest! {
        #[test]
        fn prop_set_get_roundtrip(
            x in 0usize..16,
            y in 0usize..16,
            r in any::<u8>(),
            g in any::<u8>(),
            b in any::<u8>(),
            brightness in -2.0f32..2.0
        ) {
            let mut grid = PixelGrid::new();
            let color = Rgb888::new(r, g, b);
            grid.set_pixel(x, y, color, brightness).unwrap();
            prop_assert_eq!(grid.pixel(x, y), Ok(Pixel::new(color, brightness)));
        }

        #[test]
        fn prop_out_of_range_leaves_grid(x in 0usize..64, y in 0usize..64) {
            prop_assume!(x >= 16 || y >= 16);
            let mut grid = PixelGrid::new();
            grid.fill(Rgb888::CYAN, 0.5);
            let before = grid.clone();

            prop_assert!(grid.set_pixel(x, y, Rgb888::RED, 1.0).is_err());
            prop_assert!(grid.pixel(x, y).is_err());
            prop_assert_eq!(grid, before);
        }

        #[test]
        fn prop_encode_is_pure(seed in any::<u64>()) {
            let mut grid = PixelGrid::new();
            grid.random_fill(&mut SmallRng::seed_from_u64(seed));
            prop_assert_eq!(grid.encode(), grid.encode());
        }
    }
}
