//! Button press / hold tracking
//!
//! A press is reported on release; holding past [`HOLD_MS`] reports a
//! hold while the button is still down, and the release that follows is
//! swallowed.

use eom_protocol::ButtonAction;

/// Time a level must be stable before it is accepted
pub const DEBOUNCE_MS: u64 = 20;

/// Time a button must be held to report a hold
pub const HOLD_MS: u64 = 800;

/// Debounced state of one button
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonTracker {
    raw: bool,
    raw_since_ms: u64,
    pressed: bool,
    pressed_at_ms: u64,
    hold_sent: bool,
}

impl ButtonTracker {
    pub const fn new() -> Self {
        Self {
            raw: false,
            raw_since_ms: 0,
            pressed: false,
            pressed_at_ms: 0,
            hold_sent: false,
        }
    }

    /// Whether the debounced state is "down"
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed the raw level (`true` = pressed) sampled at `now_ms`
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Option<ButtonAction> {
        if pressed != self.raw {
            self.raw = pressed;
            self.raw_since_ms = now_ms;
        }

        let settled = now_ms.saturating_sub(self.raw_since_ms) >= DEBOUNCE_MS;
        if settled && self.raw != self.pressed {
            self.pressed = self.raw;
            if self.pressed {
                self.pressed_at_ms = self.raw_since_ms;
                self.hold_sent = false;
            } else if !self.hold_sent {
                return Some(ButtonAction::Press);
            }
        }

        if self.pressed
            && !self.hold_sent
            && now_ms.saturating_sub(self.pressed_at_ms) >= HOLD_MS
        {
            self.hold_sent = true;
            return Some(ButtonAction::Hold);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_press_reported_on_release() {
        let mut button = ButtonTracker::new();
        assert_eq!(button.update(true, 100), None);
        assert_eq!(button.update(true, 120), None);
        assert!(button.is_pressed());
        assert_eq!(button.update(false, 300), None);
        assert_eq!(button.update(false, 320), Some(ButtonAction::Press));
        assert_eq!(button.update(false, 400), None);
    }

    #[test]
    fn test_bounce_ignored() {
        let mut button = ButtonTracker::new();
        assert_eq!(button.update(true, 0), None);
        assert_eq!(button.update(false, 5), None);
        assert_eq!(button.update(true, 10), None);
        assert_eq!(button.update(false, 15), None);
        assert_eq!(button.update(false, 100), None);
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_hold_then_release_swallowed() {
        let mut button = ButtonTracker::new();
        button.update(true, 0);
        button.update(true, 20);
        assert_eq!(button.update(true, 799), None);
        assert_eq!(button.update(true, 800), Some(ButtonAction::Hold));
        assert_eq!(button.update(true, 2000), None);

        button.update(false, 2100);
        assert_eq!(button.update(false, 2120), None);
        assert!(!button.is_pressed());
    }
}
