//! Frame encoding and decoding for the Unicorn HAT HD.
//!
//! Frame format:
//! - START (1 byte): 0x72 start-of-frame marker
//! - PAYLOAD (768 bytes): R, G, B per pixel, x outer / y inner scan order
//!
//! There is no length field and no checksum; the payload length is fixed.

use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};
use heapless::Vec;

/// Start-of-frame marker
pub const FRAME_START: u8 = 0x72;

/// Pixels per row
pub const ROWS: usize = 16;

/// Pixels per column
pub const COLUMNS: usize = 16;

/// Total number of pixels
pub const NUMBER_OF_PIXELS: usize = ROWS * COLUMNS;

/// Bytes per pixel (R, G, B)
pub const PIXEL_LENGTH: usize = 3;

/// Payload size in bytes
pub const FRAME_PAYLOAD_LEN: usize = PIXEL_LENGTH * NUMBER_OF_PIXELS;

/// Complete frame size (START + PAYLOAD)
pub const FRAME_LEN: usize = 1 + FRAME_PAYLOAD_LEN;

/// Errors that can occur during frame encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Pixel source did not yield exactly [`NUMBER_OF_PIXELS`] pixels
    PixelCountMismatch,
    /// Buffer too small for encoding
    BufferTooSmall,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::PixelCountMismatch => {
                write!(f, "frame needs exactly {} pixels", NUMBER_OF_PIXELS)
            }
            FrameError::BufferTooSmall => write!(f, "buffer shorter than {} bytes", FRAME_LEN),
        }
    }
}

/// Scale one color channel by a brightness factor.
///
/// The product is computed in `f32` and truncated toward zero, then the low
/// eight bits are kept. Nothing is clamped: a product above 255 (brightness
/// over 1.0) or below zero (negative brightness) wraps modulo 256, and NaN
/// encodes as 0. Products beyond the `i32` range saturate before wrapping.
#[inline]
pub fn scale_channel(value: u8, brightness: f32) -> u8 {
    let product = f32::from(value) * brightness;
    (product as i32) as u8
}

/// Scale all three channels of a color, in wire order (R, G, B)
#[inline]
pub fn scale_color(color: Rgb888, brightness: f32) -> [u8; PIXEL_LENGTH] {
    [
        scale_channel(color.r(), brightness),
        scale_channel(color.g(), brightness),
        scale_channel(color.b(), brightness),
    ]
}

/// Encoded frame payload
///
/// Always exactly [`FRAME_PAYLOAD_LEN`] bytes. Built fresh for every
/// transmission; it carries no state between frames.
#[derive(Clone, PartialEq, Eq)]
pub struct FramePayload {
    bytes: [u8; FRAME_PAYLOAD_LEN],
}

impl Default for FramePayload {
    fn default() -> Self {
        Self::blank()
    }
}

impl FramePayload {
    /// An all-zero payload (every LED off)
    pub const fn blank() -> Self {
        Self {
            bytes: [0; FRAME_PAYLOAD_LEN],
        }
    }

    /// Wrap raw payload bytes
    pub const fn from_bytes(bytes: [u8; FRAME_PAYLOAD_LEN]) -> Self {
        Self { bytes }
    }

    /// Encode a full matrix, asking `pixel(x, y)` for each position
    ///
    /// Positions are visited in wire order: x outer, y inner.
    pub fn from_fn<F>(mut pixel: F) -> Self
    where
        F: FnMut(usize, usize) -> (Rgb888, f32),
    {
        let mut bytes = [0u8; FRAME_PAYLOAD_LEN];
        let mut offset = 0;

        for x in 0..ROWS {
            for y in 0..COLUMNS {
                let (color, brightness) = pixel(x, y);
                bytes[offset..offset + PIXEL_LENGTH]
                    .copy_from_slice(&scale_color(color, brightness));
                offset += PIXEL_LENGTH;
            }
        }

        Self { bytes }
    }

    /// Encode pixels given in row-major order
    ///
    /// Every pixel is visited; the source must yield exactly
    /// [`NUMBER_OF_PIXELS`] `(color, brightness)` pairs.
    pub fn from_pixels<I>(pixels: I) -> Result<Self, FrameError>
    where
        I: IntoIterator<Item = (Rgb888, f32)>,
    {
        let mut bytes = [0u8; FRAME_PAYLOAD_LEN];
        let mut count = 0;

        for (color, brightness) in pixels {
            if count == NUMBER_OF_PIXELS {
                return Err(FrameError::PixelCountMismatch);
            }
            let offset = count * PIXEL_LENGTH;
            bytes[offset..offset + PIXEL_LENGTH].copy_from_slice(&scale_color(color, brightness));
            count += 1;
        }

        if count != NUMBER_OF_PIXELS {
            return Err(FrameError::PixelCountMismatch);
        }

        Ok(Self { bytes })
    }

    /// Raw payload bytes
    pub fn as_bytes(&self) -> &[u8; FRAME_PAYLOAD_LEN] {
        &self.bytes
    }

    /// Consume the payload, returning its bytes
    pub fn into_bytes(self) -> [u8; FRAME_PAYLOAD_LEN] {
        self.bytes
    }

    /// Encoded (R, G, B) triple for pixel `(x, y)`
    pub fn triple(&self, x: usize, y: usize) -> Option<[u8; PIXEL_LENGTH]> {
        if x >= ROWS || y >= COLUMNS {
            return None;
        }
        let offset = (x * COLUMNS + y) * PIXEL_LENGTH;
        let mut triple = [0u8; PIXEL_LENGTH];
        triple.copy_from_slice(&self.bytes[offset..offset + PIXEL_LENGTH]);
        Some(triple)
    }

    /// Encode START followed by the payload into a byte buffer
    ///
    /// Returns the number of bytes written (always [`FRAME_LEN`])
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        if buffer.len() < FRAME_LEN {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[0] = FRAME_START;
        buffer[1..FRAME_LEN].copy_from_slice(&self.bytes);

        Ok(FRAME_LEN)
    }

    /// Encode the complete frame into a fixed array
    pub fn encode_to_array(&self) -> [u8; FRAME_LEN] {
        let mut frame = [0u8; FRAME_LEN];
        frame[0] = FRAME_START;
        frame[1..].copy_from_slice(&self.bytes);
        frame
    }
}

impl core::fmt::Debug for FramePayload {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let lit = self
            .bytes
            .chunks_exact(PIXEL_LENGTH)
            .filter(|triple| triple.iter().any(|&b| b != 0))
            .count();
        f.debug_struct("FramePayload")
            .field("len", &FRAME_PAYLOAD_LEN)
            .field("lit_pixels", &lit)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FramePayload {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "FramePayload[{=[u8]:x}]", &self.bytes[..]);
    }
}

/// State machine for parsing a frame stream, as the device sees it
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, FRAME_PAYLOAD_LEN>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for START byte
    WaitingForStart,
    /// Reading payload bytes
    ReadingPayload,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            buffer: Vec::new(),
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.buffer.clear();
    }

    /// Number of payload bytes collected for the frame in progress
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Some(payload)` once 768 bytes have followed a START byte.
    pub fn feed(&mut self, byte: u8) -> Option<FramePayload> {
        match self.state {
            ParseState::WaitingForStart => {
                if byte == FRAME_START {
                    self.buffer.clear();
                    self.state = ParseState::ReadingPayload;
                }
                // Silently ignore non-START bytes while waiting
                None
            }
            ParseState::ReadingPayload => {
                // Capacity equals the payload length, so this cannot overflow
                let _ = self.buffer.push(byte);
                if self.buffer.len() < FRAME_PAYLOAD_LEN {
                    return None;
                }

                let mut bytes = [0u8; FRAME_PAYLOAD_LEN];
                bytes.copy_from_slice(&self.buffer);
                self.reset();
                Some(FramePayload::from_bytes(bytes))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<FramePayload> {
        bytes.iter().find_map(|&byte| self.feed(byte))
    }
}
