//! One intensity, many outputs
//!
//! The local actuator is driven first and is authoritative. Secondary
//! sinks (wireless peer, expansion bus) are notified afterwards in
//! registration order; a failing sink is logged and skipped.
//!
//! The current level lives in an atomic so status readers never take the
//! lock. Writers are serialised by a blocking mutex, which also keeps
//! the compare-and-update of the level consistent with what the outputs
//! were last told.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;
use portable_atomic::{AtomicU8, Ordering};

use crate::traits::{ActuatorError, IntensitySink, MotorOutput};

/// Maximum number of secondary sinks
pub const MAX_SINKS: usize = 4;

/// What a set call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntensityUpdate {
    /// Level already matched; nothing was touched
    Unchanged,
    /// Level changed and was fanned out
    Applied {
        level: u8,
        /// Number of sinks whose notification failed
        failed_sinks: u8,
    },
}

struct Outputs<'s, A> {
    actuator: A,
    sinks: Vec<&'s mut (dyn IntensitySink + Send), MAX_SINKS>,
}

/// Broadcast setter for actuator intensity
///
/// `notify` runs with the lock held, so sinks must return at once and
/// must not call back into the fan-out. Bus-backed outputs go through a
/// [`SignalSink`](super::SignalSink).
pub struct MotorOutputFanout<'s, M: RawMutex, A: MotorOutput> {
    level: AtomicU8,
    outputs: Mutex<M, RefCell<Outputs<'s, A>>>,
}

impl<'s, M: RawMutex, A: MotorOutput> MotorOutputFanout<'s, M, A> {
    /// Create a fan-out over the local actuator, starting at 0
    pub fn new(actuator: A) -> Self {
        Self {
            level: AtomicU8::new(0),
            outputs: Mutex::new(RefCell::new(Outputs {
                actuator,
                sinks: Vec::new(),
            })),
        }
    }

    /// Register a secondary sink
    ///
    /// Sinks are registered during setup, before the fan-out is shared.
    pub fn add_sink(&mut self, sink: &'s mut (dyn IntensitySink + Send)) -> Result<(), ActuatorError> {
        self.outputs
            .get_mut()
            .get_mut()
            .sinks
            .push(sink)
            .map_err(|_| ActuatorError::NoSlot)
    }

    /// Number of registered sinks
    pub fn sink_count(&self) -> usize {
        self.outputs.lock(|outputs| outputs.borrow().sinks.len())
    }

    /// Set the intensity, clamping to 0..=255
    ///
    /// Returns without side effects if the clamped value equals the
    /// current level.
    pub fn set_intensity(&self, value: i32) -> IntensityUpdate {
        let level = value.clamp(0, u8::MAX as i32) as u8;
        self.update(|_| level)
    }

    /// Adjust the intensity relative to its current value
    pub fn change_intensity(&self, diff: i32) -> IntensityUpdate {
        self.update(|current| (current as i32).saturating_add(diff).clamp(0, u8::MAX as i32) as u8)
    }

    /// Adjust the intensity, letting increases stop at `ceiling`
    ///
    /// A level already above `ceiling` is never raised and never pulled
    /// down by an increase; decreases are not limited.
    pub fn change_intensity_capped(&self, diff: i32, ceiling: u8) -> IntensityUpdate {
        self.update(|current| {
            let next = (current as i32).saturating_add(diff).clamp(0, u8::MAX as i32) as u8;
            if diff > 0 {
                next.min(ceiling.max(current))
            } else {
                next
            }
        })
    }

    /// Current intensity
    pub fn get_intensity(&self) -> u8 {
        self.level.load(Ordering::Acquire)
    }

    /// Current intensity as a fraction of full scale
    pub fn get_intensity_fraction(&self) -> f32 {
        self.get_intensity() as f32 / u8::MAX as f32
    }

    fn update(&self, target: impl FnOnce(u8) -> u8) -> IntensityUpdate {
        self.outputs.lock(|outputs| {
            let mut outputs = outputs.borrow_mut();

            let level = target(self.level.load(Ordering::Acquire));
            if level == self.level.load(Ordering::Acquire) {
                return IntensityUpdate::Unchanged;
            }

            if let Err(_e) = outputs.actuator.set_level(level) {
                #[cfg(feature = "defmt")]
                defmt::warn!("motor output rejected level {}: {}", level, _e);
            }
            self.level.store(level, Ordering::Release);

            let mut failed_sinks = 0u8;
            for (_index, sink) in outputs.sinks.iter_mut().enumerate() {
                if let Err(_e) = sink.notify(level) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("intensity sink {} failed: {}", _index, _e);
                    failed_sinks += 1;
                }
            }

            IntensityUpdate::Applied {
                level,
                failed_sinks,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::SignalSink;
    use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
    use embassy_sync::signal::Signal;
    use proptest::prelude::*;
    use std::sync::atomic::AtomicBool;
    use std::time::{Duration, Instant};
    use std::vec::Vec as StdVec;

    #[derive(Default)]
    struct FakeMotor {
        levels: StdVec<u8>,
    }

    impl MotorOutput for FakeMotor {
        fn set_level(&mut self, level: u8) -> Result<(), ActuatorError> {
            self.levels.push(level);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        seen: StdVec<u8>,
        fail: bool,
    }

    impl IntensitySink for RecordingSink {
        fn notify(&mut self, level: u8) -> Result<(), ActuatorError> {
            self.seen.push(level);
            if self.fail {
                Err(ActuatorError::Bus)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_repeated_set_notifies_once() {
        let mut sink = RecordingSink::default();
        {
            let mut fanout: MotorOutputFanout<'_, NoopRawMutex, _> =
                MotorOutputFanout::new(FakeMotor::default());
            fanout.add_sink(&mut sink).unwrap();

            assert_eq!(
                fanout.set_intensity(120),
                IntensityUpdate::Applied {
                    level: 120,
                    failed_sinks: 0
                }
            );
            assert_eq!(fanout.set_intensity(120), IntensityUpdate::Unchanged);
            assert_eq!(fanout.get_intensity(), 120);
        }
        assert_eq!(sink.seen, [120]);
    }

    #[test]
    fn test_clamps_out_of_range() {
        let fanout: MotorOutputFanout<'_, NoopRawMutex, _> =
            MotorOutputFanout::new(FakeMotor::default());

        fanout.set_intensity(1000);
        assert_eq!(fanout.get_intensity(), 255);
        assert_eq!(fanout.get_intensity_fraction(), 1.0);

        fanout.set_intensity(-5);
        assert_eq!(fanout.get_intensity(), 0);
        assert_eq!(fanout.get_intensity_fraction(), 0.0);

        // Clamped value equal to current is a no-op
        assert_eq!(fanout.set_intensity(-100), IntensityUpdate::Unchanged);
    }

    #[test]
    fn test_failing_sink_does_not_block_others() {
        let mut bad = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let mut good = RecordingSink::default();
        {
            let mut fanout: MotorOutputFanout<'_, NoopRawMutex, _> =
                MotorOutputFanout::new(FakeMotor::default());
            fanout.add_sink(&mut bad).unwrap();
            fanout.add_sink(&mut good).unwrap();

            assert_eq!(
                fanout.set_intensity(7),
                IntensityUpdate::Applied {
                    level: 7,
                    failed_sinks: 1
                }
            );
            assert_eq!(fanout.get_intensity(), 7);
        }
        assert_eq!(bad.seen, [7]);
        assert_eq!(good.seen, [7]);
    }

    #[test]
    fn test_sink_slots_bounded() {
        let mut sinks: [RecordingSink; MAX_SINKS + 1] = Default::default();
        let mut fanout: MotorOutputFanout<'_, NoopRawMutex, _> =
            MotorOutputFanout::new(FakeMotor::default());

        let (extra, regular) = sinks.split_last_mut().unwrap();
        for sink in regular.iter_mut() {
            fanout.add_sink(sink).unwrap();
        }
        assert_eq!(fanout.add_sink(extra), Err(ActuatorError::NoSlot));
        assert_eq!(fanout.sink_count(), MAX_SINKS);
    }

    #[test]
    fn test_change_intensity() {
        let fanout: MotorOutputFanout<'_, NoopRawMutex, _> =
            MotorOutputFanout::new(FakeMotor::default());

        fanout.set_intensity(250);
        fanout.change_intensity(10);
        assert_eq!(fanout.get_intensity(), 255);
        fanout.change_intensity(-55);
        assert_eq!(fanout.get_intensity(), 200);
        assert_eq!(fanout.change_intensity(0), IntensityUpdate::Unchanged);
    }

    #[test]
    fn test_capped_change_only_limits_increase() {
        let fanout: MotorOutputFanout<'_, NoopRawMutex, _> =
            MotorOutputFanout::new(FakeMotor::default());

        fanout.set_intensity(100);
        fanout.change_intensity_capped(40, 128);
        assert_eq!(fanout.get_intensity(), 128);

        // Above the ceiling: turning up holds, turning down still works
        fanout.set_intensity(200);
        assert_eq!(fanout.change_intensity_capped(4, 128), IntensityUpdate::Unchanged);
        assert_eq!(fanout.get_intensity(), 200);
        fanout.change_intensity_capped(-4, 128);
        assert_eq!(fanout.get_intensity(), 196);

        fanout.change_intensity_capped(-500, 128);
        assert_eq!(fanout.get_intensity(), 0);
    }

    #[test]
    fn test_slow_bus_does_not_stall_setter() {
        static ACCESSORY: Signal<CriticalSectionRawMutex, u8> = Signal::new();
        let mut handoff = SignalSink::new(&ACCESSORY);
        let mut fanout: MotorOutputFanout<'_, CriticalSectionRawMutex, _> =
            MotorOutputFanout::new(FakeMotor::default());
        fanout.add_sink(&mut handoff).unwrap();

        std::thread::scope(|s| {
            let bus = s.spawn(|| {
                let mut delivered = StdVec::new();
                while delivered.last() != Some(&200) {
                    delivered.push(embassy_futures::block_on(ACCESSORY.wait()));
                    // A wedged transfer
                    std::thread::sleep(Duration::from_millis(200));
                }
                delivered
            });

            for level in [50, 200] {
                let start = Instant::now();
                fanout.set_intensity(level);
                assert!(start.elapsed() < Duration::from_millis(50));
                assert_eq!(fanout.get_intensity(), level as u8);
            }

            let delivered = bus.join().unwrap();
            assert_eq!(delivered.last(), Some(&200));
        });
    }

    #[test]
    fn test_concurrent_setters_keep_level_consistent() {
        const ROUNDS: usize = 2000;
        let mut sink = RecordingSink::default();
        let last;
        {
            let mut fanout: MotorOutputFanout<'_, CriticalSectionRawMutex, _> =
                MotorOutputFanout::new(FakeMotor::default());
            fanout.add_sink(&mut sink).unwrap();
            let fanout = &fanout;
            let writing = AtomicBool::new(true);

            std::thread::scope(|s| {
                let reader = s.spawn(|| {
                    while writing.load(std::sync::atomic::Ordering::Acquire) {
                        let level = fanout.get_intensity();
                        assert!(
                            [0, 10, 20, 200, 250].contains(&level),
                            "torn level {level}"
                        );
                    }
                });
                let writers = [[10, 20], [200, 250]].map(|pair| {
                    s.spawn(move || {
                        for i in 0..ROUNDS {
                            fanout.set_intensity(pair[i % 2]);
                        }
                    })
                });
                for writer in writers {
                    writer.join().unwrap();
                }
                writing.store(false, std::sync::atomic::Ordering::Release);
                reader.join().unwrap();
            });
            last = fanout.get_intensity();
        }

        assert!(last == 20 || last == 250);
        // The sink was told every change, in the order the level took it
        assert_eq!(sink.seen.last(), Some(&last));
        assert!(sink.seen.windows(2).all(|w| w[0] != w[1]));
        assert!(sink.seen.iter().all(|l| [10, 20, 200, 250].contains(l)));
    }

    proptest! {
        #[test]
        fn prop_sinks_see_only_changes(values in proptest::collection::vec(-50i32..300, 0..40)) {
            let mut sink = RecordingSink::default();
            let mut expected = StdVec::new();
            {
                let mut fanout: MotorOutputFanout<'_, NoopRawMutex, _> =
                    MotorOutputFanout::new(FakeMotor::default());
                fanout.add_sink(&mut sink).unwrap();

                let mut last = 0u8;
                for v in values {
                    let level = v.clamp(0, 255) as u8;
                    if level != last {
                        expected.push(level);
                        last = level;
                    }
                    fanout.set_intensity(v);
                }
            }
            prop_assert_eq!(sink.seen, expected);
        }
    }
}
