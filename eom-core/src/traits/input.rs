//! UI collaborator trait

use eom_protocol::InputEvent;

use crate::config::ConfigRegistry;

/// Receives discrete input events from the tick loop
///
/// The registry is handed in by reference so UI callbacks can only
/// change configuration through its setters.
pub trait InputHandler {
    /// Handle one input event
    fn on_input(&mut self, event: InputEvent, config: &mut ConfigRegistry, now_ms: u64);
}
