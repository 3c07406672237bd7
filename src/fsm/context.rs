//! Shared mutable context threaded through every mode handler.
//!
//! `ModeContext` is the single struct that mode handlers read from and
//! write to.  It holds the latest reading and its classification, the
//! threshold store, the training session, the statistics, the menu as the
//! navigator sees it, and the output commands the control loop applies
//! after each tick.  Think of it as the "blackboard" in a blackboard
//! architecture.

use crate::classifier::{CognitiveReading, CognitiveState, classify};
use crate::config::SystemConfig;
use crate::drivers::led_matrix::{self, Grid};
use crate::drivers::status_led::{self, Rgb};
use crate::params::{ParamId, ParameterStore};
use crate::stats::Statistics;
use crate::training::{SessionRules, SessionSignal, TrainingSession};

use super::MenuState;

// ---------------------------------------------------------------------------
// Output commands (written by mode handlers; consumed by the control loop)
// ---------------------------------------------------------------------------

/// Which display layout to draw.  The control loop pulls the data for it
/// from the context when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Monitoring,
    Config(ParamId),
    Training { elapsed_secs: u32 },
    History { uptime_secs: u32 },
}

/// Outputs requested by the active view this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelCommands {
    /// 5×5 matrix mask.
    pub pattern: Grid,
    /// Indicator LED colour.
    pub indicator: Rgb,
    /// Display layout.
    pub frame: Frame,
}

impl Default for PanelCommands {
    fn default() -> Self {
        Self {
            pattern: led_matrix::BLANK,
            indicator: status_led::OFF,
            frame: Frame::Monitoring,
        }
    }
}

// ---------------------------------------------------------------------------
// ModeContext
// ---------------------------------------------------------------------------

/// The shared context passed to every mode handler function.
pub struct ModeContext {
    // -- Timing --
    /// Monotonic milliseconds at the start of this tick (wrapping).
    pub now_ms: u32,
    /// Ticks elapsed since the active view was entered.
    pub ticks_in_view: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,

    // -- Sensor data --
    /// Latest reading.  Updated before each navigator tick.
    pub reading: CognitiveReading,
    /// Classification of `reading` under the current thresholds.
    pub state: CognitiveState,

    // -- Domain state --
    pub params: ParameterStore,
    pub session: TrainingSession,
    pub stats: Statistics,
    /// Mirror of the navigator's menu state.
    pub menu: MenuState,
    /// Session transition produced by the Training handler this tick,
    /// taken by the control loop.
    pub session_signal: Option<SessionSignal>,

    // -- Outputs --
    pub commands: PanelCommands,

    // -- Configuration --
    pub config: SystemConfig,
}

impl ModeContext {
    /// Create a context seeded from `config`.  `now_ms` stamps the
    /// statistics uptime clock.
    pub fn new(config: SystemConfig, now_ms: u32) -> Self {
        let params = ParameterStore::new(config.thresholds);
        let reading = CognitiveReading::new(0.0, 0.0);
        let state = classify(&reading, &params.thresholds());
        Self {
            now_ms,
            ticks_in_view: 0,
            total_ticks: 0,
            reading,
            state,
            params,
            session: TrainingSession::new(SessionRules::from_config(&config)),
            stats: Statistics::new(now_ms),
            menu: MenuState::default(),
            session_signal: None,
            commands: PanelCommands::default(),
            config,
        }
    }

    /// Install a new reading and classify it.  Returns the new state.
    pub fn update_reading(&mut self, reading: CognitiveReading) -> CognitiveState {
        self.reading = reading;
        self.state = classify(&reading, &self.params.thresholds());
        self.state
    }

    /// Seconds spent in the active view.
    pub fn secs_in_view(&self) -> f32 {
        self.ticks_in_view as f32 * self.config.tick_interval_ms as f32 / 1000.0
    }
}
