//! Accessory bus broadcast
//!
//! Peers on the expansion bus receive every intensity change as a
//! set-intensity peer command, the same framing the device itself
//! accepts on its receive side. The bus is powered through an external
//! switch; while it is off, broadcasts fail with `Disconnected`.
//!
//! Transfers are async. The motor fan-out reaches this driver through a
//! `SignalSink` and a task that owns the bus, never directly.

use eom_core::traits::ActuatorError;
use eom_protocol::{PeerCommand, MAX_PEER_MESSAGE};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::i2c::I2c;
use heapless::Vec;

use super::BusSwitch;

/// Maximum number of peer addresses
pub const MAX_PEERS: usize = 8;

/// I2C expansion bus with a power-enable switch
pub struct AccessoryBus<'a, I, E> {
    i2c: I,
    enable_pin: E,
    switch: &'a BusSwitch,
    peers: Vec<u8, MAX_PEERS>,
}

impl<'a, I: I2c, E: OutputPin> AccessoryBus<'a, I, E> {
    /// Create a bus in the disabled state
    pub fn new(i2c: I, mut enable_pin: E, switch: &'a BusSwitch) -> Self {
        let _ = enable_pin.set_low();
        switch.set_enabled(false);
        Self {
            i2c,
            enable_pin,
            switch,
            peers: Vec::new(),
        }
    }

    /// Power the bus
    pub fn enable(&mut self) -> Result<(), ActuatorError> {
        self.enable_pin
            .set_high()
            .map_err(|_| ActuatorError::Output)?;
        self.switch.set_enabled(true);
        Ok(())
    }

    /// Cut power to the bus
    pub fn disable(&mut self) -> Result<(), ActuatorError> {
        self.switch.set_enabled(false);
        self.enable_pin
            .set_low()
            .map_err(|_| ActuatorError::Output)
    }

    pub fn is_enabled(&self) -> bool {
        self.switch.is_enabled()
    }

    /// Add a peer address to the broadcast list
    ///
    /// Adding an address twice is a no-op.
    pub fn add_peer(&mut self, address: u8) -> Result<(), ActuatorError> {
        if self.peers.contains(&address) {
            return Ok(());
        }
        self.peers.push(address).map_err(|_| ActuatorError::NoSlot)
    }

    /// Remove a peer address
    pub fn remove_peer(&mut self, address: u8) {
        self.peers.retain(|&a| a != address);
    }

    pub fn peers(&self) -> &[u8] {
        &self.peers
    }

    /// Send one command to every peer
    ///
    /// All peers are tried even if one fails.
    pub async fn broadcast(&mut self, command: PeerCommand) -> Result<(), ActuatorError> {
        if !self.is_enabled() {
            return Err(ActuatorError::Disconnected);
        }

        let mut buf = [0u8; MAX_PEER_MESSAGE];
        let len = command.encode(&mut buf).map_err(|_| ActuatorError::Bus)?;

        let mut result = Ok(());
        for &address in self.peers.iter() {
            if self.i2c.write(address, &buf[..len]).await.is_err() {
                #[cfg(feature = "defmt")]
                defmt::debug!("accessory {:#x} did not ack", address);
                result = Err(ActuatorError::Bus);
            }
        }
        result
    }
}
