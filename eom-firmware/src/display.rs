//! Display power link
//!
//! The tick task must not wait on the panel, so power changes are queued
//! as commands and carried out by the display task.

use defmt::*;

use eom_core::traits::DisplayPower;

use crate::channels::DISPLAY_CMD;

/// Panel operation requested by the power controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum DisplayCommand {
    SetDimmed(bool),
    SuspendRendering,
    Clear,
    LowPower,
    Resume,
    Render,
}

/// [`DisplayPower`] handle that forwards to the display task
#[derive(Debug, Default)]
pub struct DisplayLink {
    dropped: u32,
}

impl DisplayLink {
    pub const fn new() -> Self {
        Self { dropped: 0 }
    }

    /// Commands lost because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    fn send(&mut self, command: DisplayCommand) {
        if DISPLAY_CMD.try_send(command).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("Display queue full, dropped {}", command);
        }
    }
}

impl DisplayPower for DisplayLink {
    fn set_dimmed(&mut self, dimmed: bool) {
        self.send(DisplayCommand::SetDimmed(dimmed));
    }

    fn suspend_rendering(&mut self) {
        self.send(DisplayCommand::SuspendRendering);
    }

    fn clear(&mut self) {
        self.send(DisplayCommand::Clear);
    }

    fn enter_low_power(&mut self) {
        self.send(DisplayCommand::LowPower);
    }

    fn resume(&mut self) {
        self.send(DisplayCommand::Resume);
    }

    fn render(&mut self) {
        self.send(DisplayCommand::Render);
    }
}
