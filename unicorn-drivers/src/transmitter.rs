//! Frame transmitter
//!
//! Owns the open bus handle. Dropping the transmitter releases the bus.

use unicorn_core::FrameWrite;
use unicorn_hal::SpiBus;
use unicorn_protocol::{FramePayload, FRAME_START};

/// Writes complete frames to an open SPI bus
pub struct Transmitter<B> {
    bus: B,
    frame_write: FrameWrite,
    frames_sent: u32,
}

impl<B: SpiBus> Transmitter<B> {
    /// Wrap an open bus
    pub fn new(bus: B, frame_write: FrameWrite) -> Self {
        Self {
            bus,
            frame_write,
            frames_sent: 0,
        }
    }

    /// Send one frame: the start marker, then all 768 payload bytes
    ///
    /// Returns once the bus has flushed the frame onto the wire. A failed
    /// write or flush is returned as-is and not retried.
    pub fn transmit(&mut self, payload: &FramePayload) -> Result<(), B::Error> {
        match self.frame_write {
            FrameWrite::Separate => {
                self.bus.write_byte(FRAME_START)?;
                self.bus.write(payload.as_bytes())?;
            }
            FrameWrite::Combined => {
                let frame = payload.encode_to_array();
                self.bus.write(&frame)?;
            }
        }
        self.bus.flush()?;

        self.frames_sent = self.frames_sent.wrapping_add(1);
        log::trace!("frame {} sent", self.frames_sent);
        Ok(())
    }

    /// Number of frames written successfully (wraps at `u32::MAX`)
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }
}
