//! RP2040-specific HAL for the EOM device firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `eom-hal` traits:
//!
//! - Flash storage driver (implements `eom_hal::FlashStorage`)

#![no_std]

pub mod flash;

// Re-export shared traits from eom-hal for convenience
pub use eom_hal::{FlashStorage as FlashStorageTrait, StorageKey};
