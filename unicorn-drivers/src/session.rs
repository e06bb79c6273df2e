//! Device session
//!
//! A [`UnicornHatHd`] owns the pixel grid and the open bus for the lifetime
//! of one session. All calls run on the caller's thread; in
//! [`UpdateMode::Immediate`] a mutating call returns only after the frame
//! has been written, so bus latency is paid by every such call.
//!
//! Batch operations ([`fill`](UnicornHatHd::fill),
//! [`clear`](UnicornHatHd::clear), [`random_fill`](UnicornHatHd::random_fill)
//! and each `draw_iter` call) update every pixel first and then send a
//! single frame.

use embedded_graphics_core::pixelcolor::Rgb888;
use rand_core::RngCore;
use unicorn_core::{
    Pixel, PixelGrid, SessionConfig, SessionEvent, SessionState, UpdateMode, DEFAULT_BRIGHTNESS,
};
use unicorn_hal::{SpiBus, SpiHost, SpiSettings};

use crate::error::Error;
use crate::transmitter::Transmitter;

/// One Unicorn HAT HD session
///
/// Created in the `Ready` state by [`open`](Self::open) and torn down by
/// [`close`](Self::close) or by dropping it. After teardown every call except
/// `close` fails with [`Error::AlreadyClosed`]; the infallible
/// [`state`](Self::state), [`frames_sent`](Self::frames_sent) and the
/// drawing surface's fixed `size` stay readable.
pub struct UnicornHatHd<B: SpiBus> {
    grid: PixelGrid,
    transmitter: Option<Transmitter<B>>,
    state: SessionState,
    update_mode: UpdateMode,
    settings: SpiSettings,
}

impl<B: SpiBus> UnicornHatHd<B> {
    /// Open the bus through `host` and start a session
    ///
    /// Nothing is sent until the first frame is requested.
    pub fn open<H>(host: &mut H, config: SessionConfig) -> Result<Self, Error<B::Error>>
    where
        H: SpiHost<Bus = B, Error = B::Error>,
    {
        log::debug!(
            "opening SPI bus {} CS {} at {} Hz ({:?})",
            config.spi.bus,
            config.spi.chip_select,
            config.spi.frequency,
            config.spi.mode
        );

        let bus = host
            .open(&config.spi)
            .map_err(Error::TransportUnavailable)?;

        Ok(Self::from_bus(bus, config))
    }

    /// Start a session on a bus that is already open
    ///
    /// `config.spi` is recorded but not applied; the bus keeps whatever
    /// settings it was opened with.
    pub fn from_bus(bus: B, config: SessionConfig) -> Self {
        let state = SessionState::Uninitialized.transition(SessionEvent::TransportOpened);
        log::info!("session ready, {:?} updates", config.update_mode);

        Self {
            grid: PixelGrid::new(),
            transmitter: Some(Transmitter::new(bus, config.frame_write)),
            state,
            update_mode: config.update_mode,
            settings: config.spi,
        }
    }

    fn ensure_ready(&self) -> Result<(), Error<B::Error>> {
        if self.state.is_ready() {
            Ok(())
        } else {
            Err(Error::AlreadyClosed)
        }
    }

    /// Encode and send the current grid
    fn transmit(&mut self) -> Result<(), Error<B::Error>> {
        let transmitter = self.transmitter.as_mut().ok_or(Error::AlreadyClosed)?;
        let payload = self.grid.encode();
        transmitter
            .transmit(&payload)
            .map_err(Error::TransportUnavailable)
    }

    /// Send a frame if the session is in immediate mode
    pub(crate) fn changed(&mut self) -> Result<(), Error<B::Error>> {
        match self.update_mode {
            UpdateMode::Immediate => self.transmit(),
            UpdateMode::Manual => Ok(()),
        }
    }

    /// Set color and brightness of the pixel at `(x, y)`
    ///
    /// Full brightness is `1.0`. Fails with [`Error::OutOfRange`] without
    /// changing anything when either coordinate is outside `0..16`.
    pub fn set_pixel(
        &mut self,
        x: usize,
        y: usize,
        color: Rgb888,
        brightness: f32,
    ) -> Result<(), Error<B::Error>> {
        self.ensure_ready()?;
        self.grid.set_pixel(x, y, color, brightness)?;
        self.changed()
    }

    /// Set the color of the pixel at `(x, y)` at full brightness
    pub fn set_pixel_full(
        &mut self,
        x: usize,
        y: usize,
        color: Rgb888,
    ) -> Result<(), Error<B::Error>> {
        self.set_pixel(x, y, color, DEFAULT_BRIGHTNESS)
    }

    /// Set the color of the pixel at `(x, y)`, keeping its brightness
    pub fn set_color(&mut self, x: usize, y: usize, color: Rgb888) -> Result<(), Error<B::Error>> {
        self.ensure_ready()?;
        self.grid.set_color(x, y, color)?;
        self.changed()
    }

    /// Read the pixel at `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> Result<Pixel, Error<B::Error>> {
        self.ensure_ready()?;
        Ok(self.grid.pixel(x, y)?)
    }

    /// Read the color of the pixel at `(x, y)`
    pub fn color(&self, x: usize, y: usize) -> Result<Rgb888, Error<B::Error>> {
        self.ensure_ready()?;
        Ok(self.grid.color(x, y)?)
    }

    /// Set every pixel to one color and brightness
    pub fn fill(&mut self, color: Rgb888, brightness: f32) -> Result<(), Error<B::Error>> {
        self.ensure_ready()?;
        self.grid.fill(color, brightness);
        self.changed()
    }

    /// Set every pixel to one color at full brightness
    pub fn fill_full(&mut self, color: Rgb888) -> Result<(), Error<B::Error>> {
        self.fill(color, DEFAULT_BRIGHTNESS)
    }

    /// Turn every pixel off (black, brightness back to 1.0)
    pub fn clear(&mut self) -> Result<(), Error<B::Error>> {
        self.ensure_ready()?;
        self.grid.clear();
        self.changed()
    }

    /// Give every pixel a random color and brightness drawn from `rng`
    pub fn random_fill<R: RngCore + ?Sized>(&mut self, rng: &mut R) -> Result<(), Error<B::Error>> {
        self.ensure_ready()?;
        self.grid.random_fill(rng);
        self.changed()
    }

    /// Encode and send the current grid regardless of update mode
    pub fn show(&mut self) -> Result<(), Error<B::Error>> {
        self.ensure_ready()?;
        self.transmit()
    }

    /// Current update discipline
    pub fn update_mode(&self) -> Result<UpdateMode, Error<B::Error>> {
        self.ensure_ready()?;
        Ok(self.update_mode)
    }

    /// Switch update discipline
    ///
    /// Switching does not send a frame; pending manual changes go out with
    /// the next mutation or [`show`](Self::show).
    pub fn set_update_mode(&mut self, mode: UpdateMode) -> Result<(), Error<B::Error>> {
        self.ensure_ready()?;
        if mode != self.update_mode {
            log::debug!("update mode {:?} -> {:?}", self.update_mode, mode);
            self.update_mode = mode;
        }
        Ok(())
    }

    /// Borrow the pixel grid
    pub fn grid(&self) -> Result<&PixelGrid, Error<B::Error>> {
        self.ensure_ready()?;
        Ok(&self.grid)
    }

    pub(crate) fn grid_mut(&mut self) -> Result<&mut PixelGrid, Error<B::Error>> {
        self.ensure_ready()?;
        Ok(&mut self.grid)
    }

    /// Lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Settings the session was opened with
    pub fn settings(&self) -> Result<&SpiSettings, Error<B::Error>> {
        self.ensure_ready()?;
        Ok(&self.settings)
    }

    /// Frames written so far
    ///
    /// Diagnostic counter; reads 0 once the session is closed instead of
    /// failing.
    pub fn frames_sent(&self) -> u32 {
        self.transmitter.as_ref().map_or(0, Transmitter::frames_sent)
    }

    /// Tear the session down and release the bus
    ///
    /// Safe to call any number of times; the bus is released on the first
    /// call only.
    pub fn close(&mut self) {
        self.state = self.state.transition(SessionEvent::Close);
        if let Some(transmitter) = self.transmitter.take() {
            log::info!(
                "closing SPI bus {} after {} frames",
                self.settings.bus,
                transmitter.frames_sent()
            );
            drop(transmitter);
        }
    }
}

impl<B: SpiBus> Drop for UnicornHatHd<B> {
    fn drop(&mut self) {
        self.close();
    }
}
