//! `embedded-hal` transport adapter
//!
//! Lets any [`embedded_hal::spi::SpiDevice`] (a Linux spidev handle, an MCU
//! SPI peripheral with chip-select management) carry frames. The device is
//! configured by whoever constructed it, so the session's [`SpiSettings`]
//! are only logged here.

use embedded_hal::spi::SpiDevice;
use unicorn_hal::{SpiBus, SpiHost, SpiSettings};

/// Errors from the `embedded-hal` adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EmbeddedHalError<E> {
    /// The wrapped device reported an error
    Bus(E),
    /// The host already handed its device to a session
    DeviceTaken,
}

/// Bus handle wrapping an `embedded-hal` SPI device
///
/// Each [`SpiBus::write`] is one `SpiDevice` transaction (chip select
/// asserted for its duration). A transaction has completed by the time it
/// returns, so the default no-op [`SpiBus::flush`] is enough.
pub struct EmbeddedHalSpi<D> {
    device: D,
}

impl<D: SpiDevice> EmbeddedHalSpi<D> {
    /// Wrap a device
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Unwrap the device
    pub fn into_inner(self) -> D {
        self.device
    }
}

impl<D: SpiDevice> SpiBus for EmbeddedHalSpi<D> {
    type Error = EmbeddedHalError<D::Error>;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.device.write(data).map_err(EmbeddedHalError::Bus)
    }
}

/// Host that hands out one pre-built `embedded-hal` device
pub struct EmbeddedHalHost<D> {
    device: Option<D>,
}

impl<D: SpiDevice> EmbeddedHalHost<D> {
    /// Host for a device that is already configured for the matrix
    pub fn new(device: D) -> Self {
        Self {
            device: Some(device),
        }
    }
}

impl<D: SpiDevice> SpiHost for EmbeddedHalHost<D> {
    type Bus = EmbeddedHalSpi<D>;
    type Error = EmbeddedHalError<D::Error>;

    fn open(&mut self, settings: &SpiSettings) -> Result<Self::Bus, Self::Error> {
        let device = self.device.take().ok_or(EmbeddedHalError::DeviceTaken)?;
        log::debug!(
            "using pre-configured SPI device for bus {} CS {} (expects {} Hz, {:?})",
            settings.bus,
            settings.chip_select,
            settings.frequency,
            settings.mode
        );
        Ok(EmbeddedHalSpi::new(device))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::session::UnicornHatHd;
    use core::convert::Infallible;
    use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};
    use embedded_hal::spi::{ErrorType, Operation};
    use std::vec::Vec;
    use unicorn_core::SessionConfig;
    use unicorn_protocol::{FrameParser, FRAME_START};

    /// Records bytes and counts chip-select transactions
    #[derive(Default)]
    struct RecordingDevice {
        transactions: usize,
        bytes: Vec<u8>,
    }

    impl ErrorType for RecordingDevice {
        type Error = Infallible;
    }

    impl SpiDevice for RecordingDevice {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            self.transactions += 1;
            for op in operations.iter() {
                if let Operation::Write(data) = op {
                    self.bytes.extend_from_slice(data);
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_frame_through_spi_device() {
        let mut device = RecordingDevice::default();
        {
            let mut host = EmbeddedHalHost::new(&mut device);
            let mut hat = UnicornHatHd::open(&mut host, SessionConfig::new()).unwrap();
            hat.set_pixel(0, 1, Rgb888::WHITE, 1.0).unwrap();
        }

        assert_eq!(device.transactions, 2);
        let frame = FrameParser::new().feed_bytes(&device.bytes).unwrap();
        assert_eq!(frame.triple(0, 1), Some([255, 255, 255]));
        assert_eq!(frame.triple(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_host_hands_out_device_once() {
        let mut host = EmbeddedHalHost::new(RecordingDevice::default());
        let mut hat = UnicornHatHd::open(&mut host, SessionConfig::new()).unwrap();
        hat.close();

        // Closing released the bus; nothing is left for a second session
        assert!(matches!(
            UnicornHatHd::open(&mut host, SessionConfig::new()),
            Err(Error::TransportUnavailable(EmbeddedHalError::DeviceTaken))
        ));
    }

    #[test]
    fn test_bus_writes_are_transactions() {
        let mut host = EmbeddedHalHost::new(RecordingDevice::default());
        let mut bus = host.open(&SpiSettings::default()).unwrap();

        bus.write_byte(FRAME_START).unwrap();
        bus.write(&[0u8; 768]).unwrap();

        let device = bus.into_inner();
        assert_eq!(device.transactions, 2);
        assert_eq!(device.bytes.len(), 769);
        assert_eq!(device.bytes[0], FRAME_START);

        let mut parser = FrameParser::new();
        assert!(parser.feed_bytes(&device.bytes).is_some());
    }
}
