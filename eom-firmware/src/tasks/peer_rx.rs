//! Peer-bus target task
//!
//! Listens on the peer bus as an I2C target and queues every write for
//! the tick task. Decoding happens there; this task only moves bytes.
//! While the expansion bus is switched off, writes are acknowledged and
//! dropped.

use defmt::*;
use embassy_rp::i2c_slave::{Command, I2cSlave};

use eom_protocol::MAX_PEER_MESSAGE;

use crate::channels::{PeerFrame, BUS_SWITCH, PEER_RX};

#[embassy_executor::task]
pub async fn peer_rx_task(mut target: I2cSlave<'static, embassy_rp::peripherals::I2C1>) {
    info!("Peer RX task started");

    let mut buf = [0u8; MAX_PEER_MESSAGE];

    loop {
        match target.listen(&mut buf).await {
            Ok(Command::Write(len)) | Ok(Command::GeneralCall(len)) => queue(&buf[..len]),
            Ok(Command::WriteRead(len)) => {
                queue(&buf[..len]);
                if let Err(e) = target.respond_and_fill(&[], 0x00).await {
                    warn!("Peer read response failed: {}", e);
                }
            }
            Ok(Command::Read) => {
                if let Err(e) = target.respond_and_fill(&[], 0x00).await {
                    warn!("Peer read response failed: {}", e);
                }
            }
            Err(e) => warn!("Peer bus error: {}", e),
        }
    }
}

fn queue(bytes: &[u8]) {
    if !BUS_SWITCH.is_enabled() {
        trace!("Expansion bus off, ignored {} bytes", bytes.len());
        return;
    }
    let Ok(frame) = PeerFrame::from_slice(bytes) else {
        return;
    };
    if PEER_RX.try_send(frame).is_err() {
        warn!("Peer queue full, dropped {} bytes", bytes.len());
    }
}
