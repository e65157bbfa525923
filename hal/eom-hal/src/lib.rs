//! EOM Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits that chip-specific
//! HALs implement so the device runtime stays board-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (eom-firmware)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  eom-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ eom-hal-rp2040│
//!             └───────────────┘
//! ```
//!
//! Digital I/O, PWM and I2C go through `embedded-hal` 1.0 directly; this
//! crate only covers what `embedded-hal` does not:
//!
//! - [`flash::FlashStorage`] - Wear-levelled persistent key/value storage

#![no_std]
#![deny(unsafe_code)]

pub mod flash;

// Re-export key traits at crate root for convenience
pub use flash::{FlashError, FlashStorage, StorageKey};
