//! Coordinator task
//!
//! Gathers the input that arrived since the last cycle, runs one
//! [`DeviceTickLoop::tick`](eom_core::runtime::DeviceTickLoop::tick),
//! then commits configuration if its save deadline has passed.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};
use heapless::Vec;

use eom_core::persistence::PersistenceFailed;
use eom_core::runtime::CycleInputs;
use eom_protocol::ButtonEvent;

use crate::board::TICK_INTERVAL_MS;
use crate::channels::{BUTTON_EVENTS, BUTTON_QUEUE_SIZE, PEER_RX};
use crate::config::FlashConfigStorage;
use crate::{Device, Motor};

#[embassy_executor::task]
pub async fn tick_task(
    mut device: Device,
    mut storage: FlashConfigStorage<'static>,
    motor: &'static Motor,
) {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;
        let now = Instant::now().as_millis();

        let mut buttons: Vec<ButtonEvent, BUTTON_QUEUE_SIZE> = Vec::new();
        while !buttons.is_full() {
            match BUTTON_EVENTS.try_receive() {
                Ok(event) => {
                    let _ = buttons.push(event);
                }
                Err(_) => break,
            }
        }
        let frame = PEER_RX.try_receive().ok();

        let report = device.tick(
            CycleInputs {
                now_ms: now,
                buttons: &buttons,
                peer_rx: frame.as_deref(),
            },
            motor,
        );

        if let Some(command) = report.peer_command {
            debug!("Peer command {}", command);
        }
        if let Some(transition) = report.power {
            debug!(
                "Display {} -> {} ({} commands dropped so far)",
                transition.from,
                transition.to,
                device.display().dropped()
            );
        }

        if let Err(PersistenceFailed(e)) = device.persist(now, &mut storage).await {
            // Pending save is dropped; the next edit schedules another
            warn!("Configuration not saved: {}", e);
        }
    }
}
