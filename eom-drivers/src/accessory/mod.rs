//! Expansion bus accessories

pub mod bus;
pub mod switch;

pub use bus::{AccessoryBus, MAX_PEERS};
pub use switch::BusSwitch;
