//! Collaborator traits
//!
//! These traits define the interface between the coordination core and
//! the hardware or application layers that plug into it.

pub mod actuator;
pub mod display;
pub mod input;
pub mod storage;

pub use actuator::{ActuatorError, IntensitySink, MotorOutput};
pub use display::DisplayPower;
pub use input::InputHandler;
pub use storage::{ConfigStorage, StorageError};
