//! Rotary position shared with the encoder task

use portable_atomic::{AtomicI32, Ordering};

/// Position counter written by the encoder source and read by the tick loop
///
/// Single writer, single reader. The reader keeps its own shadow copy of
/// the last observed position; the counter never resets on read.
#[derive(Debug)]
pub struct RotaryCounter {
    position: AtomicI32,
}

impl RotaryCounter {
    pub const fn new(initial: i32) -> Self {
        Self {
            position: AtomicI32::new(initial),
        }
    }

    /// Current position
    pub fn position(&self) -> i32 {
        self.position.load(Ordering::Acquire)
    }

    /// Move by `delta` detents (wraps on overflow)
    pub fn step(&self, delta: i32) {
        self.position.fetch_add(delta, Ordering::AcqRel);
    }

    /// Overwrite the position
    pub fn set(&self, position: i32) {
        self.position.store(position, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_and_set() {
        let counter = RotaryCounter::new(128);
        counter.step(3);
        counter.step(-1);
        assert_eq!(counter.position(), 130);

        counter.set(100);
        assert_eq!(counter.position(), 100);
    }

    #[test]
    fn test_step_wraps() {
        let counter = RotaryCounter::new(i32::MAX);
        counter.step(1);
        assert_eq!(counter.position(), i32::MIN);
    }
}
