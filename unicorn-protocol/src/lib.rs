//! Unicorn HAT HD Wire Protocol
//!
//! This crate defines the byte stream the Unicorn HAT HD expects on its SPI
//! input. The matrix has no command set: every transfer is a complete frame
//! that replaces the whole 16×16 image.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌───────┬──────────────────────────────────────────────┐
//! │ SOF   │ PAYLOAD                                      │
//! │ 1B    │ 768B = 256 pixels × (R, G, B), row-major     │
//! └───────┴──────────────────────────────────────────────┘
//! ```
//!
//! Pixel `(x, y)` lands at payload offset `3 * (x * 16 + y)`. Each channel is
//! pre-multiplied by the pixel's brightness on the host; the device applies
//! no further processing.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;

pub use frame::{
    scale_channel, scale_color, FrameError, FrameParser, FramePayload, COLUMNS, FRAME_LEN,
    FRAME_PAYLOAD_LEN, FRAME_START, NUMBER_OF_PIXELS, PIXEL_LENGTH, ROWS,
};
