//! Session configuration
//!
//! Everything here is fixed when a session opens, except the update mode,
//! which the caller may toggle on a live session.

use unicorn_hal::SpiSettings;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// When pixel changes reach the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UpdateMode {
    /// Every mutating call encodes and transmits a frame before returning.
    /// Batch operations (fill, clear, random fill, a draw call) send one
    /// frame after the whole batch.
    #[default]
    Immediate,
    /// Mutations stay in memory until the caller asks for a frame
    Manual,
}

/// How the start-of-frame marker and the payload are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrameWrite {
    /// Marker in its own transaction, then the payload
    #[default]
    Separate,
    /// Marker prefixed to the payload in a single transaction
    Combined,
}

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    /// Bus, chip select, clock and mode
    pub spi: SpiSettings,
    /// Initial update discipline
    pub update_mode: UpdateMode,
    /// Transaction layout of each frame
    pub frame_write: FrameWrite,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConfig {
    /// Device defaults: 9 MHz mode 0 on CE0 of bus 0, immediate updates,
    /// marker and payload as separate writes
    pub const fn new() -> Self {
        Self {
            spi: SpiSettings::UNICORN_HAT_HD,
            update_mode: UpdateMode::Immediate,
            frame_write: FrameWrite::Separate,
        }
    }

    /// Use different SPI settings
    pub const fn with_spi(mut self, spi: SpiSettings) -> Self {
        self.spi = spi;
        self
    }

    /// Start in the given update mode
    pub const fn with_update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    /// Use the given frame transaction layout
    pub const fn with_frame_write(mut self, frame_write: FrameWrite) -> Self {
        self.frame_write = frame_write;
        self
    }
}
