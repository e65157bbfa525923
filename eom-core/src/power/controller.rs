//! Active / Dimmed / Standby state machine

use crate::config::ConfigRecord;
use crate::traits::DisplayPower;

/// Display power state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Fully on, normal refresh
    #[default]
    Active,
    /// Backlight reduced, content still refreshing
    Dimmed,
    /// Panel in low-power mode, rendering suspended
    Standby,
}

/// A state change made by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerTransition {
    pub from: PowerState,
    pub to: PowerState,
}

/// Idle thresholds; `None` disables that axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdleThresholds {
    pub dim_after_ms: Option<u64>,
    pub off_after_ms: Option<u64>,
}

impl IdleThresholds {
    /// Never leave Active
    pub const DISABLED: Self = Self {
        dim_after_ms: None,
        off_after_ms: None,
    };

    /// Build from second counts; zero or negative disables the axis
    pub fn from_seconds(dim_s: i32, off_s: i32) -> Self {
        let ms = |s: i32| (s > 0).then(|| s as u64 * 1000);
        Self {
            dim_after_ms: ms(dim_s),
            off_after_ms: ms(off_s),
        }
    }

    /// Thresholds configured in the record
    pub fn from_record(record: &ConfigRecord) -> Self {
        Self::from_seconds(record.screen_dim_seconds, record.screen_timeout_seconds)
    }
}

/// Display power manager driven by idle time
///
/// Elapsed time only ever moves the state away from Active; the only way
/// back is [`activity`](Self::activity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPowerController {
    state: PowerState,
    idle_since_ms: u64,
}

impl DisplayPowerController {
    /// Start Active with the idle timer at `now_ms`
    pub const fn new(now_ms: u64) -> Self {
        Self {
            state: PowerState::Active,
            idle_since_ms: now_ms,
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Timestamp of the last qualifying input
    pub fn idle_since(&self) -> u64 {
        self.idle_since_ms
    }

    /// Idle time at `now_ms`
    pub fn idle_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.idle_since_ms)
    }

    /// Apply the idle rules once
    ///
    /// If both thresholds have passed in the same evaluation the panel
    /// goes straight to Standby and is dimmed once on the way.
    pub fn evaluate<D: DisplayPower>(
        &mut self,
        now_ms: u64,
        thresholds: IdleThresholds,
        display: &mut D,
    ) -> Option<PowerTransition> {
        let idle = self.idle_ms(now_ms);
        let past = |limit: Option<u64>| matches!(limit, Some(limit) if idle > limit);

        let from = self.state;
        if past(thresholds.off_after_ms) && from != PowerState::Standby {
            if from == PowerState::Active {
                display.set_dimmed(true);
            }
            display.suspend_rendering();
            display.clear();
            display.enter_low_power();
            self.state = PowerState::Standby;
        } else if past(thresholds.dim_after_ms) && from == PowerState::Active {
            display.set_dimmed(true);
            self.state = PowerState::Dimmed;
        } else {
            return None;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("display {} -> {} after {} ms idle", from, self.state, idle);

        Some(PowerTransition {
            from,
            to: self.state,
        })
    }

    /// Register a qualifying input event
    ///
    /// Resets the idle timer and wakes the panel if it was not Active.
    pub fn activity<D: DisplayPower>(&mut self, now_ms: u64, display: &mut D) -> Option<PowerTransition> {
        self.idle_since_ms = now_ms;

        let from = self.state;
        if from == PowerState::Active {
            return None;
        }

        display.set_dimmed(false);
        display.resume();
        display.render();
        self.state = PowerState::Active;

        #[cfg(feature = "defmt")]
        defmt::info!("display {} -> Active on input", from);

        Some(PowerTransition {
            from,
            to: PowerState::Active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Dim(bool),
        Suspend,
        Clear,
        LowPower,
        Resume,
        Render,
    }

    #[derive(Default)]
    struct FakeDisplay {
        calls: Vec<Call>,
    }

    impl DisplayPower for FakeDisplay {
        fn set_dimmed(&mut self, dimmed: bool) {
            self.calls.push(Call::Dim(dimmed));
        }
        fn suspend_rendering(&mut self) {
            self.calls.push(Call::Suspend);
        }
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }
        fn enter_low_power(&mut self) {
            self.calls.push(Call::LowPower);
        }
        fn resume(&mut self) {
            self.calls.push(Call::Resume);
        }
        fn render(&mut self) {
            self.calls.push(Call::Render);
        }
    }

    const THRESHOLDS: IdleThresholds = IdleThresholds {
        dim_after_ms: Some(1000),
        off_after_ms: Some(3000),
    };

    #[test]
    fn test_dim_then_standby_then_wake() {
        let mut display = FakeDisplay::default();
        let mut power = DisplayPowerController::new(0);

        assert_eq!(power.evaluate(1000, THRESHOLDS, &mut display), None);
        assert_eq!(power.state(), PowerState::Active);

        let t = power.evaluate(1001, THRESHOLDS, &mut display).unwrap();
        assert_eq!((t.from, t.to), (PowerState::Active, PowerState::Dimmed));
        assert_eq!(display.calls, [Call::Dim(true)]);

        assert_eq!(power.evaluate(2000, THRESHOLDS, &mut display), None);

        display.calls.clear();
        let t = power.evaluate(3001, THRESHOLDS, &mut display).unwrap();
        assert_eq!((t.from, t.to), (PowerState::Dimmed, PowerState::Standby));
        assert_eq!(display.calls, [Call::Suspend, Call::Clear, Call::LowPower]);

        assert_eq!(power.evaluate(10_000, THRESHOLDS, &mut display), None);

        display.calls.clear();
        let t = power.activity(12_345, &mut display).unwrap();
        assert_eq!((t.from, t.to), (PowerState::Standby, PowerState::Active));
        assert_eq!(power.idle_since(), 12_345);
        assert_eq!(
            display.calls,
            [Call::Dim(false), Call::Resume, Call::Render]
        );
    }

    #[test]
    fn test_straight_to_standby_dims_once() {
        let mut display = FakeDisplay::default();
        let mut power = DisplayPowerController::new(0);

        let t = power.evaluate(5000, THRESHOLDS, &mut display).unwrap();
        assert_eq!((t.from, t.to), (PowerState::Active, PowerState::Standby));
        assert_eq!(
            display.calls,
            [Call::Dim(true), Call::Suspend, Call::Clear, Call::LowPower]
        );
    }

    #[test]
    fn test_no_time_based_recovery() {
        let mut display = FakeDisplay::default();
        let mut power = DisplayPowerController::new(0);
        power.evaluate(1500, THRESHOLDS, &mut display);

        // Thresholds disabled later: state stays until input arrives
        assert_eq!(
            power.evaluate(1600, IdleThresholds::DISABLED, &mut display),
            None
        );
        assert_eq!(power.state(), PowerState::Dimmed);
    }

    #[test]
    fn test_activity_while_active_only_resets_timer() {
        let mut display = FakeDisplay::default();
        let mut power = DisplayPowerController::new(0);

        assert_eq!(power.activity(900, &mut display), None);
        assert_eq!(power.idle_since(), 900);
        assert!(display.calls.is_empty());

        assert_eq!(power.evaluate(1900, THRESHOLDS, &mut display), None);
        assert!(power.evaluate(1901, THRESHOLDS, &mut display).is_some());
    }

    #[test]
    fn test_both_disabled_never_leaves_active() {
        let mut display = FakeDisplay::default();
        let mut power = DisplayPowerController::new(0);

        assert_eq!(
            power.evaluate(u64::MAX, IdleThresholds::DISABLED, &mut display),
            None
        );
        assert_eq!(power.state(), PowerState::Active);
    }

    #[test]
    fn test_single_axis() {
        let mut display = FakeDisplay::default();
        let mut power = DisplayPowerController::new(0);
        let off_only = IdleThresholds {
            dim_after_ms: None,
            off_after_ms: Some(100),
        };

        assert_eq!(power.evaluate(100, off_only, &mut display), None);
        let t = power.evaluate(101, off_only, &mut display).unwrap();
        assert_eq!(t.to, PowerState::Standby);
    }

    #[test]
    fn test_thresholds_from_record() {
        let mut record = ConfigRecord::default();
        assert_eq!(IdleThresholds::from_record(&record), IdleThresholds::DISABLED);

        record.screen_dim_seconds = 30;
        record.screen_timeout_seconds = 0;
        assert_eq!(
            IdleThresholds::from_record(&record),
            IdleThresholds {
                dim_after_ms: Some(30_000),
                off_after_ms: None
            }
        );
        assert_eq!(IdleThresholds::from_seconds(-1, 2).off_after_ms, Some(2000));
    }
}
