//! Latest-value hand-off to an async sink task
//!
//! Anything that talks to a bus is too slow to run inside the fan-out
//! lock. Such outputs register a [`SignalSink`] instead and do their I/O
//! from their own task, awaiting the signal.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

use crate::traits::{ActuatorError, IntensitySink};

/// [`IntensitySink`] that posts the level to a [`Signal`]
///
/// A level not yet picked up is overwritten by the next one, so the
/// receiving task always sees the newest intensity and never a backlog.
pub struct SignalSink<'a, M: RawMutex> {
    signal: &'a Signal<M, u8>,
}

impl<'a, M: RawMutex> SignalSink<'a, M> {
    pub const fn new(signal: &'a Signal<M, u8>) -> Self {
        Self { signal }
    }
}

impl<M: RawMutex> IntensitySink for SignalSink<'_, M> {
    fn notify(&mut self, level: u8) -> Result<(), ActuatorError> {
        self.signal.signal(level);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_latest_level_wins() {
        let signal: Signal<NoopRawMutex, u8> = Signal::new();
        let mut sink = SignalSink::new(&signal);

        sink.notify(10).unwrap();
        sink.notify(90).unwrap();
        assert_eq!(signal.try_take(), Some(90));
        assert_eq!(signal.try_take(), None);
    }
}
