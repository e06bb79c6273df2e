//! Unicorn HD Hardware Abstraction Layer
//!
//! This crate defines the transport traits the matrix driver talks to.
//! Platform crates (or the `embedded-hal` adapter in `unicorn-drivers`)
//! implement them so the same driver code runs on any SPI master.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  unicorn-drivers (UnicornHatHd session) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  unicorn-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  test / mock  │
//! │  SpiDevice    │       │    buses      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SpiHost`] - Acquires a bus handle for fixed session settings
//! - [`spi::SpiBus`] - Write-only SPI master operations

#![no_std]
#![deny(unsafe_code)]

pub mod spi;

// Re-export key traits at crate root for convenience
pub use spi::{Mode, Phase, Polarity, SpiBus, SpiHost, SpiSettings};
