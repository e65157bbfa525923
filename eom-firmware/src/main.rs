//! EOM - Device Runtime Firmware
//!
//! Main firmware binary for RP2040-based boards. Wires the board-agnostic
//! coordinator in `eom-core` to the front panel, the vibration motor, the
//! expansion bus and the configuration partition in flash.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::i2c_slave::{self, I2cSlave};
use embassy_rp::peripherals::{I2C0, I2C1};
use embassy_rp::pwm::{Config as PwmConfig, Pwm, PwmOutput};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Instant;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use eom_core::config::{ConfigRegistry, LoadOutcome};
use eom_core::output::{MotorOutputFanout, SignalSink};
use eom_core::runtime::DeviceTickLoop;
use eom_drivers::accessory::AccessoryBus;
use eom_drivers::motor::PwmMotor;
use eom_hal_rp2040::flash::FlashStorage;
use eom_protocol::Button;

use crate::board::{
    ACCESSORY_ADDRESSES, BACKLIGHT_PWM_TOP, CONFIG_ORIGIN, MOTOR_PWM_TOP, PEER_ADDRESS,
};
use crate::channels::{ACCESSORY_INTENSITY, BUS_SWITCH, ROTARY, WIRELESS_INTENSITY};
use crate::config::FlashConfigStorage;
use crate::display::DisplayLink;
use crate::tasks::{Accessories, PanelButton};
use crate::ui::ManualControl;

mod board;
mod channels;
mod config;
mod display;
mod tasks;
mod ui;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

/// Motor fan-out shared by the UI and the peer bus
pub type Motor = MotorOutputFanout<'static, CriticalSectionRawMutex, PwmMotor<PwmOutput<'static>>>;

/// The coordinator as run by the tick task
pub type Device = DeviceTickLoop<'static, ManualControl, DisplayLink>;

type Handoff = SignalSink<'static, CriticalSectionRawMutex>;

static MOTOR: StaticCell<Motor> = StaticCell::new();
static ACCESSORY_SINK: StaticCell<Handoff> = StaticCell::new();
static WIRELESS_SINK: StaticCell<Handoff> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("EOM firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Configuration first: sink registration depends on it
    let mut storage = FlashConfigStorage::new(FlashStorage::new(p.FLASH, p.DMA_CH0));
    let mut registry = ConfigRegistry::with_defaults();
    registry.set_origin(CONFIG_ORIGIN);
    if !storage.has_record().await {
        info!("No stored configuration, first boot");
    }
    match registry.load(&mut storage).await {
        LoadOutcome::Loaded => info!("Configuration loaded from {}", CONFIG_ORIGIN),
        LoadOutcome::Repaired(n) => warn!("Configuration loaded, {} fields reset", n),
        LoadOutcome::Defaulted(e) => warn!("Using default configuration: {}", e),
    }

    // Vibration motor: PWM slice 0, channel A on GPIO16
    let mut motor_cfg = PwmConfig::default();
    motor_cfg.top = MOTOR_PWM_TOP;
    let (motor_pwm, _) = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, motor_cfg).split();
    let motor_pwm = unwrap!(motor_pwm);
    let motor = MOTOR.init(MotorOutputFanout::new(PwmMotor::new(motor_pwm)));

    // Expansion bus: I2C0 on GPIO4/5 behind the switch on GPIO22
    let bus_i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
    let bus_enable = Output::new(p.PIN_22, Level::Low);
    let mut accessories: Accessories = AccessoryBus::new(bus_i2c, bus_enable, &BUS_SWITCH);
    if let Err(e) = accessories.enable() {
        warn!("Expansion bus enable failed: {}", e);
    }
    for address in ACCESSORY_ADDRESSES {
        if let Err(e) = accessories.add_peer(address) {
            warn!("Accessory {:#x} not registered: {}", address, e);
        }
    }
    if let Err(e) = motor.add_sink(ACCESSORY_SINK.init(SignalSink::new(&ACCESSORY_INTENSITY))) {
        warn!("Accessory sink not registered: {}", e);
    }

    if registry.record().bt_on {
        if let Err(e) = motor.add_sink(WIRELESS_SINK.init(SignalSink::new(&WIRELESS_INTENSITY))) {
            warn!("Wireless sink not registered: {}", e);
        }
    }
    info!("Motor output ready, {} sinks", motor.sink_count());
    let motor: &'static Motor = motor;

    // Peer bus target: I2C1 on GPIO6/7
    let mut target_cfg = i2c_slave::Config::default();
    target_cfg.addr = PEER_ADDRESS as u16;
    let peer = I2cSlave::new(p.I2C1, p.PIN_7, p.PIN_6, Irqs, target_cfg);

    // Front panel: encoder on GPIO10/11, buttons on GPIO12..15
    let encoder_a = Input::new(p.PIN_10, Pull::Up);
    let encoder_b = Input::new(p.PIN_11, Pull::Up);
    let buttons = [
        PanelButton {
            button: Button::Back,
            pin: Input::new(p.PIN_12, Pull::Up),
        },
        PanelButton {
            button: Button::Mid,
            pin: Input::new(p.PIN_13, Pull::Up),
        },
        PanelButton {
            button: Button::Ok,
            pin: Input::new(p.PIN_14, Pull::Up),
        },
        PanelButton {
            button: Button::Menu,
            pin: Input::new(p.PIN_15, Pull::Up),
        },
    ];

    // Display: backlight on PWM slice 1 / GPIO18, panel supply on GPIO19
    let mut backlight_cfg = PwmConfig::default();
    backlight_cfg.top = BACKLIGHT_PWM_TOP;
    let (backlight, _) = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_18, backlight_cfg).split();
    let backlight = unwrap!(backlight);
    let panel_power = Output::new(p.PIN_19, Level::Low);

    let device: Device = DeviceTickLoop::new(
        &ROTARY,
        registry,
        ManualControl::new(motor),
        DisplayLink::new(),
        Instant::now().as_millis(),
    );

    // Spawn tasks
    spawner.spawn(tasks::display_task(backlight, panel_power)).unwrap();
    spawner.spawn(tasks::encoder_task(encoder_a, encoder_b)).unwrap();
    spawner.spawn(tasks::buttons_task(buttons)).unwrap();
    spawner.spawn(tasks::peer_rx_task(peer)).unwrap();
    spawner.spawn(tasks::accessory_task(accessories)).unwrap();
    spawner.spawn(tasks::tick_task(device, storage, motor)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat, intensity {}", motor.get_intensity());
    }
}
