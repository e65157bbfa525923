//! EOM peer-bus protocol and input events
//!
//! This crate defines the byte-oriented command format spoken on the
//! expansion (peer) bus, and the unified input event type that every
//! hardware input source is reduced to before it reaches the UI layer.
//!
//! # Peer Bus Overview
//!
//! Each message is one bus transfer:
//! ```text
//! ┌────────┬─────────────────┐
//! │ OPCODE │ PAYLOAD         │
//! │ 1B     │ opcode-specific │
//! └────────┴─────────────────┘
//! ```
//!
//! The channel is unauthenticated and best-effort. Receivers discard empty
//! transfers, unknown opcodes and short payloads without reporting them, so
//! a noisy or unknown peer can never take the receiver down.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod events;
pub mod peer;

pub use events::{Button, ButtonAction, ButtonEvent, InputEvent};
pub use peer::{PeerCommand, PeerError, MAX_PEER_MESSAGE, OP_SET_INTENSITY};
