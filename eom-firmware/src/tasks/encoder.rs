//! Rotary encoder task

use defmt::*;
use embassy_futures::select::select;
use embassy_rp::gpio::Input;

use eom_drivers::input::QuadratureDecoder;

use crate::channels::ROTARY;

/// Steps the shared rotary counter on every detent
#[embassy_executor::task]
pub async fn encoder_task(mut a: Input<'static>, mut b: Input<'static>) {
    info!("Encoder task started");

    let mut decoder = QuadratureDecoder::new(a.is_high(), b.is_high());

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;

        if let Some(step) = decoder.update(a.is_high(), b.is_high()) {
            ROTARY.step(step);
            trace!("Encoder {}", ROTARY.position());
        }
    }
}
