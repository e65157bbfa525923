//! Board-agnostic coordination core for the EOM device runtime
//!
//! This crate contains all runtime logic that does not depend on
//! specific hardware implementations:
//!
//! - Name-addressable configuration registry and its record
//! - Debounced persistence scheduling and the stored-record codec
//! - Motor output fan-out to the local actuator and secondary sinks
//! - Display power state machine (Active / Dimmed / Standby)
//! - Rotary counter and the per-cycle device tick loop
//! - Collaborator traits (display, actuator, storage, UI)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod output;
pub mod persistence;
pub mod power;
pub mod runtime;
pub mod traits;
