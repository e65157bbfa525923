//! Motor output fan-out

pub mod fanout;
pub mod signal;

pub use fanout::{IntensityUpdate, MotorOutputFanout, MAX_SINKS};
pub use signal::SignalSink;
