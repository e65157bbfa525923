//! PWM motor output
//!
//! ```ignore
//! let motor = PwmMotor::new(pwm_channel);
//! let fanout = MotorOutputFanout::<CriticalSectionRawMutex, _>::new(motor);
//! fanout.set_intensity(128); // ~50% duty
//! ```

use eom_core::traits::{ActuatorError, MotorOutput};
use embedded_hal::pwm::SetDutyCycle;

/// Local motor output over one PWM channel
pub struct PwmMotor<P> {
    pwm: P,
    level: u8,
}

impl<P: SetDutyCycle> PwmMotor<P> {
    /// Wrap a PWM channel; the output is driven off immediately
    pub fn new(mut pwm: P) -> Self {
        let _ = pwm.set_duty_cycle_fully_off();
        Self { pwm, level: 0 }
    }

    /// Last level successfully applied
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Release the PWM channel
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> MotorOutput for PwmMotor<P> {
    fn set_level(&mut self, level: u8) -> Result<(), ActuatorError> {
        self.pwm
            .set_duty_cycle_fraction(level as u16, u8::MAX as u16)
            .map_err(|_| ActuatorError::Output)?;
        self.level = level;
        Ok(())
    }
}
