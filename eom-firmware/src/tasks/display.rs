//! Panel power task
//!
//! Carries out the power commands queued by [`DisplayLink`](crate::display::DisplayLink):
//! backlight level on a PWM channel, panel supply on a GPIO. Frame
//! rendering belongs to the UI and only sees the `rendering` flag.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;
use embedded_hal::pwm::SetDutyCycle;

use crate::board::DIMMED_BACKLIGHT_PERCENT;
use crate::channels::DISPLAY_CMD;
use crate::display::DisplayCommand;

#[embassy_executor::task]
pub async fn display_task(mut backlight: PwmOutput<'static>, mut panel_power: Output<'static>) {
    info!("Display task started");

    panel_power.set_high();
    set_backlight(&mut backlight, 100);
    let mut rendering = true;

    loop {
        let command = DISPLAY_CMD.receive().await;
        trace!("Display command {}", command);

        match command {
            DisplayCommand::SetDimmed(true) => {
                set_backlight(&mut backlight, DIMMED_BACKLIGHT_PERCENT)
            }
            DisplayCommand::SetDimmed(false) => set_backlight(&mut backlight, 100),
            DisplayCommand::SuspendRendering => rendering = false,
            // Blank by darkening the backlight
            DisplayCommand::Clear => set_backlight(&mut backlight, 0),
            DisplayCommand::LowPower => panel_power.set_low(),
            DisplayCommand::Resume => {
                panel_power.set_high();
                rendering = true;
            }
            DisplayCommand::Render => {
                if rendering {
                    debug!("Panel redraw requested");
                }
            }
        }
    }
}

fn set_backlight(backlight: &mut PwmOutput<'static>, percent: u8) {
    if let Err(e) = backlight.set_duty_cycle_percent(percent) {
        warn!("Backlight update failed: {}", Debug2Format(&e));
    }
}
