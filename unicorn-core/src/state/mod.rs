//! Session lifecycle
//!
//! A session is one-shot: it opens its transport once and, after teardown,
//! never becomes usable again.

pub mod events;
pub mod machine;

pub use events::SessionEvent;
pub use machine::SessionState;
