//! Shared expansion bus power state
//!
//! The bus driver flips it; the peer-bus receive path reads it to decide
//! whether incoming transfers count. Neither side needs a lock.

use portable_atomic::{AtomicBool, Ordering};

/// Whether the expansion bus is powered
#[derive(Debug, Default)]
pub struct BusSwitch {
    enabled: AtomicBool,
}

impl BusSwitch {
    /// A switch in the off position
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_off() {
        static SWITCH: BusSwitch = BusSwitch::new();
        assert!(!SWITCH.is_enabled());
        SWITCH.set_enabled(true);
        assert!(SWITCH.is_enabled());
        SWITCH.set_enabled(false);
        assert!(!SWITCH.is_enabled());
    }
}
