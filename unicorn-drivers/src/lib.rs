//! Unicorn HAT HD driver
//!
//! This crate ties the pixel store to an SPI transport:
//!
//! - [`UnicornHatHd`] - one device session (pixels, update policy, teardown)
//! - [`Transmitter`] - writes encoded frames to an open bus
//! - `embedded-graphics` drawing through
//!   [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget)
//! - [`embedded::EmbeddedHalHost`] - use any `embedded-hal` SPI device as transport
//!
//! ```ignore
//! let mut host = EmbeddedHalHost::new(spidev);
//! let config = SessionConfig::new().with_update_mode(UpdateMode::Manual);
//! let mut hat = UnicornHatHd::open(&mut host, config)?;
//! hat.fill(Rgb888::new(240, 255, 255), 0.5)?;
//! hat.set_pixel(3, 5, Rgb888::RED, 1.0)?;
//! hat.show()?;
//! hat.close();
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod embedded;
pub mod error;
pub mod graphics;
pub mod session;
pub mod transmitter;

#[cfg(test)]
pub(crate) mod mock;

pub use embedded::{EmbeddedHalError, EmbeddedHalHost, EmbeddedHalSpi};
pub use error::Error;
pub use session::UnicornHatHd;
pub use transmitter::Transmitter;

// Types callers need alongside the session
pub use embedded_graphics_core::pixelcolor::Rgb888;
pub use unicorn_core::{FrameWrite, Pixel, SessionConfig, SessionState, UpdateMode};
pub use unicorn_hal::{SpiBus, SpiHost, SpiSettings};
pub use unicorn_protocol::{COLUMNS, NUMBER_OF_PIXELS, ROWS};
