//! Peer-bus command encoding and decoding
//!
//! Message format:
//! - OPCODE (1 byte): command identifier
//! - PAYLOAD (0-31 bytes): opcode-specific data
//!
//! Only one opcode is defined today. New opcodes must keep the
//! discard-on-unknown policy: `decode` reports them as
//! [`PeerError::UnknownOpcode`] and the receiver drops them.

/// Set actuator intensity, payload byte 0 = intensity (0-255)
pub const OP_SET_INTENSITY: u8 = 0x10;

/// Largest transfer the receiver buffers (opcode + payload)
pub const MAX_PEER_MESSAGE: usize = 32;

/// Errors that can occur while decoding or encoding peer messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeerError {
    /// Transfer carried no bytes
    Empty,
    /// Opcode is not one this receiver understands
    UnknownOpcode(u8),
    /// Opcode is known but the payload is too short
    ShortPayload,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Commands a peer can send over the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeerCommand {
    /// Set the actuator intensity (0-255)
    SetIntensity(u8),
}

impl PeerCommand {
    /// Decode a received transfer
    ///
    /// Trailing bytes beyond the opcode's payload are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, PeerError> {
        let (&opcode, payload) = bytes.split_first().ok_or(PeerError::Empty)?;

        match opcode {
            OP_SET_INTENSITY => {
                let &intensity = payload.first().ok_or(PeerError::ShortPayload)?;
                Ok(PeerCommand::SetIntensity(intensity))
            }
            other => Err(PeerError::UnknownOpcode(other)),
        }
    }

    /// Get the opcode byte for this command
    pub fn opcode(&self) -> u8 {
        match self {
            PeerCommand::SetIntensity(_) => OP_SET_INTENSITY,
        }
    }

    /// Encode this command into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, PeerError> {
        match *self {
            PeerCommand::SetIntensity(intensity) => {
                if buffer.len() < 2 {
                    return Err(PeerError::BufferTooSmall);
                }
                buffer[0] = OP_SET_INTENSITY;
                buffer[1] = intensity;
                Ok(2)
            }
        }
    }
}
