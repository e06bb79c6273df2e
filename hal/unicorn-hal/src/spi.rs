//! SPI bus abstractions
//!
//! The matrix only ever receives data, so the bus trait is write-only.
//! Acquiring and releasing the bus is split out into [`SpiHost`]: a host
//! opens a bus handle for a set of [`SpiSettings`], and the handle is
//! released when it is dropped.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SPI bus master
///
/// An open handle to a peripheral on the bus. Dropping the handle closes
/// it; implementations must release the underlying resource in `Drop`.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Write data without reading, as a single transaction
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Write a single byte as its own transaction
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.write(&[byte])
    }

    /// Wait until all pending writes have left the controller
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Source of SPI bus handles
///
/// Stands in for the platform's "open device" call. Settings passed to
/// [`SpiHost::open`] are fixed for the lifetime of the returned bus.
pub trait SpiHost {
    /// Bus handle produced by this host
    type Bus: SpiBus<Error = Self::Error>;

    /// Error type for open and bus operations
    type Error;

    /// Open a bus handle with the given settings
    fn open(&mut self, settings: &SpiSettings) -> Result<Self::Bus, Self::Error>;
}

/// SPI session settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiSettings {
    /// Bus number (e.g. 0 for `/dev/spidev0.*`)
    pub bus: u8,
    /// Chip-select line on that bus
    pub chip_select: u8,
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity and phase
    pub mode: Mode,
}

impl SpiSettings {
    /// Settings expected by the Unicorn HAT HD: 9 MHz, mode 0, CE0 on bus 0
    pub const UNICORN_HAT_HD: Self = Self {
        bus: 0,
        chip_select: 0,
        frequency: 9_000_000,
        mode: Mode::Mode0,
    };

    /// Clock polarity of the configured mode
    pub fn polarity(&self) -> Polarity {
        let (polarity, _) = self.mode.into();
        polarity
    }

    /// Clock phase of the configured mode
    pub fn phase(&self) -> Phase {
        let (_, phase) = self.mode.into();
        phase
    }
}

impl Default for SpiSettings {
    fn default() -> Self {
        Self::UNICORN_HAT_HD
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    #[default]
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}
