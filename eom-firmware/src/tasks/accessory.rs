//! Expansion bus output task
//!
//! Owns the accessory bus and forwards the newest intensity to every
//! accessory. The fan-out only posts to `ACCESSORY_INTENSITY`, so a slow
//! or wedged accessory delays this task and nothing else.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{with_timeout, Duration};

use eom_drivers::accessory::AccessoryBus;
use eom_protocol::PeerCommand;

use crate::board::ACCESSORY_TIMEOUT_MS;
use crate::channels::ACCESSORY_INTENSITY;

/// The expansion bus as wired on this board
pub type Accessories = AccessoryBus<'static, I2c<'static, I2C0, Async>, Output<'static>>;

#[embassy_executor::task]
pub async fn accessory_task(mut bus: Accessories) {
    info!("Accessory task started, {} peers", bus.peers().len());

    loop {
        let level = ACCESSORY_INTENSITY.wait().await;
        let sent = with_timeout(
            Duration::from_millis(ACCESSORY_TIMEOUT_MS),
            bus.broadcast(PeerCommand::SetIntensity(level)),
        )
        .await;

        match sent {
            Ok(Ok(())) => trace!("Accessories at {}", level),
            Ok(Err(e)) => debug!("Accessory broadcast failed: {}", e),
            Err(_) => warn!("Accessory broadcast timed out at level {}", level),
        }
    }
}
