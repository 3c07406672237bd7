//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, panel outputs, buttons, event sinks, config
//! storage) implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::classifier::{CognitiveReading, CognitiveState};
use crate::config::SystemConfig;
use crate::drivers::button::Button;
use crate::drivers::led_matrix::Grid;
use crate::error::ConfigError;
use crate::params::ParamId;
use crate::params::Thresholds;
use crate::stats::Statistics;
use crate::training::TrainingSession;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick.
pub trait SensorPort {
    /// Fresh `(attention, relaxation)` pair.  Implementations never block
    /// and never fail; a bad conversion is absorbed inside the adapter.
    fn next_reading(&mut self) -> (f32, f32);
}

// ───────────────────────────────────────────────────────────────
// Display port (domain → text panel)
// ───────────────────────────────────────────────────────────────

/// Full-screen redraws, one per view.
pub trait DisplayPort {
    fn render_monitoring(&mut self, reading: &CognitiveReading, state: CognitiveState);

    fn render_config(&mut self, param: ParamId, thresholds: &Thresholds);

    fn render_training(&mut self, session: &TrainingSession, elapsed_secs: u32);

    fn render_history(&mut self, stats: &Statistics, uptime_secs: u32);
}

// ───────────────────────────────────────────────────────────────
// Pattern port (domain → LED matrix and indicator)
// ───────────────────────────────────────────────────────────────

pub trait PatternPort {
    /// Show a 5×5 mask.
    fn set_pattern(&mut self, pattern: &Grid);

    /// Set the RGB indicator LED.
    fn set_indicator_color(&mut self, r: u8, g: u8, b: u8);
}

// ───────────────────────────────────────────────────────────────
// Audio port (domain → buzzers)
// ───────────────────────────────────────────────────────────────

/// Non-blocking cues.  Starting a cue returns at once; [`update`](Self::update)
/// advances playback and must be called every tick.
pub trait AudioPort {
    fn play_success(&mut self);

    fn play_error(&mut self);

    fn play_beep(&mut self);

    fn update(&mut self, now_ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Input port (domain ← button levels)
// ───────────────────────────────────────────────────────────────

/// Level queries for chords.  Edges arrive through the ISR queue instead.
pub trait InputPort {
    fn is_held(&mut self, button: Button) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: persistent config → domain)
// ───────────────────────────────────────────────────────────────

/// Loads the startup configuration.
///
/// Implementations validate before returning.  Invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Returns [`ConfigError::NotFound`] when nothing is stored.
    fn load(&self) -> Result<SystemConfig, ConfigError>;
}

/// Everything the control loop drives each tick.
pub trait PanelPorts: SensorPort + DisplayPort + PatternPort + AudioPort + InputPort {}

impl<T> PanelPorts for T where T: SensorPort + DisplayPort + PatternPort + AudioPort + InputPort {}
