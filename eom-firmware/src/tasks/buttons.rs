//! Front panel button task
//!
//! Buttons are active low with pull-ups. All four are scanned from one
//! task and reported through one channel.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};

use eom_drivers::input::ButtonTracker;
use eom_protocol::{Button, ButtonEvent};

use crate::board::BUTTON_SCAN_MS;
use crate::channels::BUTTON_EVENTS;

/// One scanned button
pub struct PanelButton {
    pub button: Button,
    pub pin: Input<'static>,
}

#[embassy_executor::task]
pub async fn buttons_task(buttons: [PanelButton; 4]) {
    info!("Buttons task started");

    let mut trackers = [ButtonTracker::new(); 4];
    let mut ticker = Ticker::every(Duration::from_millis(BUTTON_SCAN_MS));

    loop {
        ticker.next().await;
        let now = Instant::now().as_millis();

        for (panel, tracker) in buttons.iter().zip(trackers.iter_mut()) {
            let Some(action) = tracker.update(panel.pin.is_low(), now) else {
                continue;
            };

            let event = ButtonEvent::new(panel.button, action);
            if BUTTON_EVENTS.try_send(event).is_err() {
                warn!("Button queue full, dropped {}", event);
            }
        }
    }
}
