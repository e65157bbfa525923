//! Display power management
//!
//! Idle time drives the panel from Active to Dimmed to Standby. Only
//! user input brings it back.

pub mod controller;

pub use controller::{DisplayPowerController, IdleThresholds, PowerState, PowerTransition};
