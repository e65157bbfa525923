//! Board constants
//!
//! Pin assignments live in `main.rs` next to the peripheral setup.

/// Tick period of the coordinator
pub const TICK_INTERVAL_MS: u64 = 10;

/// Front panel scan period
pub const BUTTON_SCAN_MS: u64 = 5;

/// Encoder position at boot
pub const ENCODER_INITIAL_POSITION: i32 = 128;

/// Our address when acting as a peer-bus target
pub const PEER_ADDRESS: u8 = 0x30;

/// Accessory addresses probed on the expansion bus at boot
pub const ACCESSORY_ADDRESSES: [u8; 2] = [0x31, 0x32];

/// Upper bound on one accessory broadcast
pub const ACCESSORY_TIMEOUT_MS: u64 = 50;

/// Motor PWM counter top; 125 MHz / 5000 = 25 kHz
pub const MOTOR_PWM_TOP: u16 = 4999;

/// Backlight PWM counter top
pub const BACKLIGHT_PWM_TOP: u16 = 0x8000;

/// Backlight level while dimmed, percent
pub const DIMMED_BACKLIGHT_PERCENT: u8 = 20;

/// Origin label recorded in the configuration
pub const CONFIG_ORIGIN: &str = "flash:config";
