//! Session lifecycle events

/// Events that drive [`SessionState`](super::SessionState) transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// The SPI bus handle was acquired with the session settings
    TransportOpened,
    /// Teardown requested
    Close,
}
