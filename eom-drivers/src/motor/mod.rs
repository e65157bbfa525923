//! Motor driver implementations
//!
//! The vibration motor is a single PWM channel; intensity 0..=255 maps
//! linearly onto the duty cycle.

pub mod pwm;

pub use pwm::PwmMotor;
