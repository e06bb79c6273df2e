//! Session state machine
//!
//! Whether a session may touch its pixels or its bus is a function of the
//! current state only.

use super::events::SessionEvent;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Transport not yet acquired
    #[default]
    Uninitialized,
    /// Bus open; pixels may be changed and frames sent
    Ready,
    /// Torn down; the bus has been released
    Closed,
}

impl SessionState {
    /// Check if pixel and frame operations are allowed
    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready)
    }

    /// Check if the session has been torn down
    pub fn is_closed(&self) -> bool {
        matches!(self, SessionState::Closed)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: SessionEvent) -> Self {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            (Uninitialized, TransportOpened) => Ready,
            // Nothing acquired yet, nothing to release
            (Uninitialized, Close) => Closed,

            (Ready, Close) => Closed,

            // Repeated teardown is a no-op
            (Closed, Close) => Closed,

            // No reopen: Ready and Closed ignore TransportOpened
            _ => self,
        }
    }
}
