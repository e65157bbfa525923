//! Inter-task communication channels
//!
//! Input tasks feed the tick task through these; the tick task never
//! blocks on them.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::Vec;

use eom_core::runtime::RotaryCounter;
use eom_drivers::accessory::BusSwitch;
use eom_protocol::{ButtonEvent, MAX_PEER_MESSAGE};

use crate::board::ENCODER_INITIAL_POSITION;
use crate::display::DisplayCommand;

/// Button events buffered between two ticks
pub const BUTTON_QUEUE_SIZE: usize = 8;

/// Peer transfers waiting for the tick task
const PEER_QUEUE_SIZE: usize = 4;

/// Display commands waiting for the display task
const DISPLAY_QUEUE_SIZE: usize = 8;

/// One raw peer-bus transfer
pub type PeerFrame = Vec<u8, MAX_PEER_MESSAGE>;

/// Rotary position, written by the encoder task
pub static ROTARY: RotaryCounter = RotaryCounter::new(ENCODER_INITIAL_POSITION);

/// Debounced button events from the front panel
pub static BUTTON_EVENTS: Channel<CriticalSectionRawMutex, ButtonEvent, BUTTON_QUEUE_SIZE> =
    Channel::new();

/// Transfers received as a peer-bus target
pub static PEER_RX: Channel<CriticalSectionRawMutex, PeerFrame, PEER_QUEUE_SIZE> =
    Channel::new();

/// Panel power commands from the tick task
pub static DISPLAY_CMD: Channel<CriticalSectionRawMutex, DisplayCommand, DISPLAY_QUEUE_SIZE> =
    Channel::new();

/// Latest intensity for the wireless link (latest value wins)
pub static WIRELESS_INTENSITY: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// Latest intensity for the accessory task (latest value wins)
pub static ACCESSORY_INTENSITY: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// Expansion bus power, flipped by the accessory bus driver
pub static BUS_SWITCH: BusSwitch = BusSwitch::new();
