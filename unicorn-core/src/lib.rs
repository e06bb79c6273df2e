//! Board-agnostic core logic for the Unicorn HAT HD driver
//!
//! This crate contains everything that does not touch the SPI bus:
//!
//! - Pixel model (color plus per-pixel brightness)
//! - Bounds-checked 16×16 pixel store and its frame encoding
//! - Session configuration (SPI settings, update discipline)
//! - Session lifecycle state machine

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod grid;
pub mod pixel;
pub mod state;

pub use config::{FrameWrite, SessionConfig, UpdateMode};
pub use grid::{Axis, OutOfRange, PixelGrid};
pub use pixel::{Pixel, DEFAULT_BRIGHTNESS};
pub use state::{SessionEvent, SessionState};
