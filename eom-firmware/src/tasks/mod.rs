//! Embassy async tasks
//!
//! The tick task owns the coordinator; the others feed it through the
//! channels in `crate::channels` or carry out what it queues.

pub mod accessory;
pub mod buttons;
pub mod display;
pub mod encoder;
pub mod peer_rx;
pub mod tick;

pub use accessory::{accessory_task, Accessories};
pub use buttons::{buttons_task, PanelButton};
pub use display::display_task;
pub use encoder::encoder_task;
pub use peer_rx::peer_rx_task;
pub use tick::tick_task;
