//! Actuator output traits
//!
//! The local motor output and every secondary sink take the same
//! 0..=255 intensity scale.

/// Errors from actuator outputs and sinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// The local output rejected the value
    Output,
    /// Bus transfer to a peer failed
    Bus,
    /// The sink is not connected
    Disconnected,
    /// No free sink slot
    NoSlot,
}

/// The local, authoritative actuator output
pub trait MotorOutput {
    /// Drive the output at `level` (0 = off, 255 = full)
    fn set_level(&mut self, level: u8) -> Result<(), ActuatorError>;
}

/// A secondary receiver of intensity changes
///
/// Failures are reported but never stop the fan-out.
pub trait IntensitySink {
    /// Notify the sink of a new intensity
    fn notify(&mut self, level: u8) -> Result<(), ActuatorError>;
}
