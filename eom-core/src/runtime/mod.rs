//! Per-cycle coordination
//!
//! [`DeviceTickLoop`] merges the rotary counter, button events and the
//! peer channel into one bounded, non-blocking step per cycle.

pub mod encoder;
pub mod peer;
pub mod tick;

pub use encoder::RotaryCounter;
pub use peer::dispatch;
pub use tick::{CycleInputs, DeviceTickLoop, TickReport};
