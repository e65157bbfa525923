//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in eom-core, written against `embedded-hal` 1.0 and `embedded-hal-async`:
//!
//! - Motor output (PWM)
//! - Accessory bus broadcast (async I2C peers behind a bus-enable switch)
//! - Front panel input (quadrature decoder, button press/hold tracker)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod accessory;
pub mod input;
pub mod motor;
