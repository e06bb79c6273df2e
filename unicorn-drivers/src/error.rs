//! Session errors

use unicorn_core::OutOfRange;

/// Errors returned by a [`UnicornHatHd`](crate::UnicornHatHd) session
///
/// `E` is the transport's error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Coordinate outside the matrix; nothing was changed
    OutOfRange(OutOfRange),
    /// Opening or writing the bus failed
    TransportUnavailable(E),
    /// The session has been torn down
    AlreadyClosed,
}

impl<E> From<OutOfRange> for Error<E> {
    fn from(err: OutOfRange) -> Self {
        Error::OutOfRange(err)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::OutOfRange(err) => write!(f, "coordinate out of range: {}", err),
            Error::TransportUnavailable(err) => write!(f, "SPI transport unavailable: {:?}", err),
            Error::AlreadyClosed => write!(f, "session already closed"),
        }
    }
}
