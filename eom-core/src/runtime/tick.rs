//! The per-cycle coordinator

use embassy_sync::blocking_mutex::raw::RawMutex;
use eom_protocol::{ButtonEvent, InputEvent, PeerCommand};

use super::encoder::RotaryCounter;
use super::peer;
use crate::config::ConfigRegistry;
use crate::output::MotorOutputFanout;
use crate::persistence::PersistenceFailed;
use crate::power::{DisplayPowerController, IdleThresholds, PowerState, PowerTransition};
use crate::traits::{ConfigStorage, DisplayPower, InputHandler, MotorOutput};

/// Everything gathered for one cycle
#[derive(Debug, Clone, Copy)]
pub struct CycleInputs<'b> {
    /// Monotonic time of this cycle
    pub now_ms: u64,
    /// Button events that arrived since the last cycle, oldest first
    pub buttons: &'b [ButtonEvent],
    /// At most one received peer buffer
    pub peer_rx: Option<&'b [u8]>,
}

impl<'b> CycleInputs<'b> {
    /// A cycle with no discrete events
    pub const fn at(now_ms: u64) -> Self {
        Self {
            now_ms,
            buttons: &[],
            peer_rx: None,
        }
    }
}

/// What one cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Encoder delta forwarded to the UI
    pub encoder_delta: Option<i32>,
    /// Button events forwarded to the UI
    pub buttons: usize,
    /// Peer command that was applied
    pub peer_command: Option<PeerCommand>,
    /// Display power change, from input or from idle time
    pub power: Option<PowerTransition>,
}

/// Top-level per-cycle coordinator
///
/// Owns the configuration registry, the display power controller and the
/// shadow copy of the rotary position. The counter itself is written by
/// the encoder source and only read here.
pub struct DeviceTickLoop<'a, U: InputHandler, D: DisplayPower> {
    counter: &'a RotaryCounter,
    last_position: i32,
    power: DisplayPowerController,
    config: ConfigRegistry,
    ui: U,
    display: D,
}

impl<'a, U: InputHandler, D: DisplayPower> DeviceTickLoop<'a, U, D> {
    /// Create the loop; the idle timer starts at `now_ms`
    pub fn new(
        counter: &'a RotaryCounter,
        config: ConfigRegistry,
        ui: U,
        display: D,
        now_ms: u64,
    ) -> Self {
        Self {
            counter,
            last_position: counter.position(),
            power: DisplayPowerController::new(now_ms),
            config,
            ui,
            display,
        }
    }

    /// Run one cycle
    ///
    /// Fixed order: encoder delta, button events, peer command, then a
    /// single power evaluation. Nothing here blocks.
    pub fn tick<M: RawMutex, A: MotorOutput>(
        &mut self,
        inputs: CycleInputs<'_>,
        motor: &MotorOutputFanout<'_, M, A>,
    ) -> TickReport {
        let now = inputs.now_ms;
        let mut report = TickReport::default();

        // Deltas between two reads coalesce into one event
        let position = self.counter.position();
        let delta = position.wrapping_sub(self.last_position);
        if delta != 0 {
            self.last_position = position;
            report.encoder_delta = Some(delta);
            self.input(InputEvent::Encoder { delta }, now, &mut report);
        }

        for &button in inputs.buttons {
            self.input(InputEvent::Button(button), now, &mut report);
            report.buttons += 1;
        }

        if let Some(bytes) = inputs.peer_rx {
            report.peer_command = peer::dispatch(bytes, motor);
        }

        let thresholds = IdleThresholds::from_record(self.config.record());
        if let Some(transition) = self.power.evaluate(now, thresholds, &mut self.display) {
            report.power = Some(transition);
        }

        report
    }

    fn input(&mut self, event: InputEvent, now: u64, report: &mut TickReport) {
        if let Some(transition) = self.power.activity(now, &mut self.display) {
            report.power = Some(transition);
        }
        self.ui.on_input(event, &mut self.config, now);
    }

    /// Commit configuration if its save deadline has passed
    pub async fn persist<S: ConfigStorage>(
        &mut self,
        now_ms: u64,
        storage: &mut S,
    ) -> Result<bool, PersistenceFailed> {
        self.config.persist(now_ms, storage).await
    }

    pub fn config(&self) -> &ConfigRegistry {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigRegistry {
        &mut self.config
    }

    pub fn power_state(&self) -> PowerState {
        self.power.state()
    }

    /// Timestamp of the last qualifying input
    pub fn idle_since(&self) -> u64 {
        self.power.idle_since()
    }

    /// Last rotary position the loop observed
    pub fn last_position(&self) -> i32 {
        self.last_position
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
