//! Manual-control front panel
//!
//! Stands in for the menu system: the encoder trims the motor, the
//! buttons cover stop, save and mode selection.

use core::fmt::Write;

use defmt::*;
use heapless::String;

use eom_core::config::ConfigRegistry;
use eom_core::traits::InputHandler;
use eom_protocol::{Button, ButtonAction, ButtonEvent, InputEvent};

use crate::Motor;

/// Encoder-to-intensity scale
const INTENSITY_PER_DETENT: i32 = 4;

/// Button and encoder bindings for manual operation
pub struct ManualControl {
    motor: &'static Motor,
}

impl ManualControl {
    pub fn new(motor: &'static Motor) -> Self {
        Self { motor }
    }

    /// Turning up stops at `motor_max_speed`; a level set above it over
    /// the peer bus is left alone until the dial goes down
    fn trim(&self, delta: i32, config: &ConfigRegistry) {
        self.motor.change_intensity_capped(
            delta.saturating_mul(INTENSITY_PER_DETENT),
            config.record().motor_max_speed,
        );
    }

    fn next_mode(&self, config: &mut ConfigRegistry, now_ms: u64) {
        let next = (config.record().vibration_mode.as_i32() + 1) % 5;
        let mut value: String<12> = String::new();
        if write!(value, "{}", next).is_err() {
            return;
        }

        match config.set("vibration_mode", &value, now_ms) {
            Ok(_) => info!("Vibration mode {}", config.record().vibration_mode),
            Err(e) => warn!("Mode change rejected: {}", e),
        }
    }
}

impl InputHandler for ManualControl {
    fn on_input(&mut self, event: InputEvent, config: &mut ConfigRegistry, now_ms: u64) {
        match event {
            InputEvent::Encoder { delta } => self.trim(delta, config),
            InputEvent::Button(ButtonEvent {
                button: Button::Mid,
                action: ButtonAction::Press,
            }) => {
                info!("Motor stop");
                self.motor.set_intensity(0);
            }
            InputEvent::Button(ButtonEvent {
                button: Button::Ok,
                action: ButtonAction::Hold,
            }) => {
                info!("Save requested");
                config.request_save(now_ms);
            }
            InputEvent::Button(ButtonEvent {
                button: Button::Menu,
                action: ButtonAction::Press,
            }) => self.next_mode(config, now_ms),
            InputEvent::Button(ButtonEvent {
                button: Button::Back,
                action: ButtonAction::Hold,
            }) => {
                warn!("Factory reset");
                config.factory_reset();
            }
            other => trace!("Unbound input {}", other),
        }
    }
}
