//! In-memory SPI host for tests
//!
//! Records every write as its own transaction and counts bus releases. A
//! buffered host holds writes back until the bus is flushed, like a
//! controller with a transmit FIFO.

use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use unicorn_hal::{SpiBus, SpiHost, SpiSettings};
use unicorn_protocol::{FrameParser, FramePayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Open refused (no such bus, permission denied)
    Unavailable,
    /// Device went away mid-session
    Disconnected,
}

#[derive(Debug, Default)]
pub struct Wire {
    /// Transactions that reached the device
    pub writes: Vec<Vec<u8>>,
    /// Transactions accepted but not yet flushed (buffered hosts only)
    pub pending: Vec<Vec<u8>>,
    pub releases: usize,
    pub opened_with: Option<SpiSettings>,
    buffered: bool,
    disconnected: bool,
    flush_fails: bool,
}

impl Wire {
    /// All bytes in write order, ignoring transaction boundaries
    pub fn bytes(&self) -> Vec<u8> {
        self.writes.iter().flatten().copied().collect()
    }

    /// Frames as the device would decode them
    pub fn frames(&self) -> Vec<FramePayload> {
        let mut parser = FrameParser::new();
        self.bytes()
            .into_iter()
            .filter_map(|byte| parser.feed(byte))
            .collect()
    }
}

pub struct MockHost {
    wire: Rc<RefCell<Wire>>,
    refuse_open: bool,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            wire: Rc::new(RefCell::new(Wire::default())),
            refuse_open: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            refuse_open: true,
            ..Self::new()
        }
    }

    /// Host whose buses only deliver writes on flush
    pub fn buffered() -> Self {
        let host = Self::new();
        host.wire.borrow_mut().buffered = true;
        host
    }

    /// Make every subsequent flush fail, leaving writes pending
    pub fn fail_flush(&self) {
        self.wire.borrow_mut().flush_fails = true;
    }

    /// Make every subsequent write fail
    pub fn disconnect(&self) {
        self.wire.borrow_mut().disconnected = true;
    }

    pub fn wire(&self) -> Ref<'_, Wire> {
        self.wire.borrow()
    }
}

impl SpiHost for MockHost {
    type Bus = MockBus;
    type Error = MockError;

    fn open(&mut self, settings: &SpiSettings) -> Result<MockBus, MockError> {
        if self.refuse_open {
            return Err(MockError::Unavailable);
        }
        self.wire.borrow_mut().opened_with = Some(*settings);
        Ok(MockBus {
            wire: Rc::clone(&self.wire),
        })
    }
}

pub struct MockBus {
    wire: Rc<RefCell<Wire>>,
}

impl SpiBus for MockBus {
    type Error = MockError;

    fn write(&mut self, data: &[u8]) -> Result<(), MockError> {
        let mut wire = self.wire.borrow_mut();
        if wire.disconnected {
            return Err(MockError::Disconnected);
        }
        if wire.buffered {
            wire.pending.push(data.to_vec());
        } else {
            wire.writes.push(data.to_vec());
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MockError> {
        let mut wire = self.wire.borrow_mut();
        if wire.disconnected || wire.flush_fails {
            return Err(MockError::Disconnected);
        }
        let pending = core::mem::take(&mut wire.pending);
        wire.writes.extend(pending);
        Ok(())
    }
}

impl Drop for MockBus {
    fn drop(&mut self) {
        self.wire.borrow_mut().releases += 1;
    }
}
