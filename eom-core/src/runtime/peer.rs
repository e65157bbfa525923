//! Peer bus dispatch

use embassy_sync::blocking_mutex::raw::RawMutex;
use eom_protocol::PeerCommand;

use crate::output::MotorOutputFanout;
use crate::traits::MotorOutput;

/// Decode one peer buffer and apply it
///
/// Empty buffers, unknown opcodes and short payloads are dropped without
/// an error. Returns the command that was applied, if any.
pub fn dispatch<M: RawMutex, A: MotorOutput>(
    bytes: &[u8],
    motor: &MotorOutputFanout<'_, M, A>,
) -> Option<PeerCommand> {
    let command = match PeerCommand::decode(bytes) {
        Ok(command) => command,
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::trace!("peer buffer dropped: {}", _e);
            return None;
        }
    };

    match command {
        PeerCommand::SetIntensity(level) => {
            motor.set_intensity(level as i32);
        }
    }

    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ActuatorError;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    struct NullMotor;

    impl MotorOutput for NullMotor {
        fn set_level(&mut self, _level: u8) -> Result<(), ActuatorError> {
            Ok(())
        }
    }

    fn fanout() -> MotorOutputFanout<'static, NoopRawMutex, NullMotor> {
        MotorOutputFanout::new(NullMotor)
    }

    #[test]
    fn test_set_intensity() {
        let motor = fanout();
        assert_eq!(
            dispatch(&[0x10, 200], &motor),
            Some(PeerCommand::SetIntensity(200))
        );
        assert_eq!(motor.get_intensity(), 200);
    }

    #[test]
    fn test_unknown_opcode_ignored() {
        let motor = fanout();
        motor.set_intensity(9);
        assert_eq!(dispatch(&[0xFF, 1, 2], &motor), None);
        assert_eq!(motor.get_intensity(), 9);
    }

    #[test]
    fn test_empty_and_short_ignored() {
        let motor = fanout();
        assert_eq!(dispatch(&[], &motor), None);
        assert_eq!(dispatch(&[0x10], &motor), None);
        assert_eq!(motor.get_intensity(), 0);
    }
}
