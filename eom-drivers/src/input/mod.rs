//! Front panel input decoding
//!
//! Both decoders are pure state machines fed with pin levels and
//! timestamps, so the firmware tasks own the pins and the timing.

pub mod button;
pub mod quadrature;

pub use button::{ButtonTracker, DEBOUNCE_MS, HOLD_MS};
pub use quadrature::QuadratureDecoder;
