//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the mode navigator and the shared context.  It
//! exposes a clean, hardware-agnostic API.  All I/O flows through port
//! traits injected at call sites, making the entire service testable with
//! mock adapters.
//!
//! ```text
//!  EventQueue ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  SensorPort ──▶ │        AppService         │ ──▶ DisplayPort
//!   InputPort ──▶ │ Navigator · Session · Stats│ ──▶ PatternPort
//!                 └──────────────────────────┘ ──▶ AudioPort
//! ```

use log::{info, warn};

use crate::classifier::{CognitiveReading, CognitiveState};
use crate::config::SystemConfig;
use crate::drivers::button::{Button, ButtonEvent};
use crate::events::EventQueue;
use crate::fsm::context::{Frame, ModeContext};
use crate::fsm::modes::build_mode_table;
use crate::fsm::{Mode, MenuState, NavChange, Navigator, Route, route};
use crate::params::ParameterStore;
use crate::stats::Statistics;
use crate::training::{SessionSignal, TrainingSession};

use super::events::AppEvent;
use super::ports::{AudioPort, EventSink, InputPort, PanelPorts};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    nav: Navigator,
    ctx: ModeContext,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.  `now_ms` stamps the
    /// statistics uptime clock.
    ///
    /// A config that fails [`SystemConfig::validate`] is replaced by the
    /// defaults.  Does **not** start the navigator — call [`start`] next.
    /// The debounce window lives on the ISR side and is not applied here.
    ///
    /// [`start`]: Self::start
    pub fn new(config: SystemConfig, now_ms: u32) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("Config rejected ({}), using defaults", e);
                SystemConfig::default()
            }
        };
        let ctx = ModeContext::new(config, now_ms);
        let nav = Navigator::new(build_mode_table(), Mode::Monitoring);
        Self {
            nav,
            ctx,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter the initial mode (Monitoring).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.nav.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.nav.mode()));
        info!("AppService started in {:?}", self.nav.mode());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle:
    /// drain buttons → read sensors → classify → mode handler → outputs.
    ///
    /// The `hw` parameter satisfies every panel port at once; this avoids
    /// several mutable borrows of one adapter while keeping the port
    /// boundary explicit.
    pub fn tick<const N: usize>(
        &mut self,
        queue: &EventQueue<N>,
        hw: &mut impl PanelPorts,
        sink: &mut impl EventSink,
        now_ms: u32,
    ) {
        self.tick_count += 1;
        self.ctx.now_ms = now_ms;

        // 1. Buttons queued since the last tick, oldest first
        queue.drain(|event| self.handle_button(event, &mut *hw, &mut *sink, now_ms));

        // 2. Sensors and classification
        let (attention, relaxation) = hw.next_reading();
        let prev_state = self.ctx.state;
        let state = self.ctx.update_reading(CognitiveReading::new(attention, relaxation));
        if state != prev_state {
            sink.emit(&AppEvent::CognitiveStateChanged {
                from: prev_state,
                to: state,
            });
        }

        // 3. Active view handler
        self.nav.tick(&mut self.ctx);

        // 4. Session transitions produced by the tick
        if let Some(signal) = self.ctx.session_signal.take() {
            self.apply_session_signal(signal, &mut *hw, sink);
        }

        // 5. Panel outputs
        self.render(hw);

        // 6. Audio playback
        hw.update(now_ms);

        // 7. Report lost edges
        let dropped = queue.take_dropped();
        if dropped > 0 {
            warn!("EVENTS | {} button event(s) dropped, queue full", dropped);
            sink.emit(&AppEvent::EventsDropped(dropped));
        }
    }

    // ── Button handling ───────────────────────────────────────

    /// Dispatch one debounced button event.
    ///
    /// Every routed event is acknowledged audibly: a beep, or the success
    /// melody for a session start and a statistics reset.
    pub fn handle_button(
        &mut self,
        event: ButtonEvent,
        hw: &mut (impl AudioPort + InputPort),
        sink: &mut impl EventSink,
        now_ms: u32,
    ) {
        self.ctx.now_ms = now_ms;
        let next_held = event == ButtonEvent::Set && hw.is_held(Button::Next);
        let menu = self.nav.menu();

        match route(&menu, self.ctx.session.status(), event, next_held) {
            Route::Navigate(event) => {
                let Some(change) = self.nav.navigate(event, &mut self.ctx) else {
                    return;
                };
                hw.play_beep();
                sink.emit(&match change {
                    NavChange::ModeChanged { from, to } => AppEvent::ModeChanged { from, to },
                    NavChange::OverlayChanged(param) => AppEvent::OverlayChanged(param),
                });
            }
            Route::EditParameter { param, raise } => {
                let value = if raise {
                    self.ctx.params.increase(param)
                } else {
                    self.ctx.params.decrease(param)
                };
                info!("PARAM | {} = {:.1}", param.label(), value);
                hw.play_beep();
                sink.emit(&AppEvent::ThresholdChanged { param, value });
            }
            Route::Training(ButtonEvent::Next) => {
                if let Some(signal) = self.ctx.session.cycle_objective() {
                    self.apply_session_signal(signal, hw, sink);
                }
            }
            Route::Training(_) => {
                let signal = self.ctx.session.press_set(now_ms);
                self.apply_session_signal(signal, hw, sink);
            }
            Route::StatisticsReset => {
                self.ctx.stats.reset(now_ms);
                info!("STATS | reset");
                hw.play_success();
                sink.emit(&AppEvent::StatisticsReset);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.nav.mode()
    }

    pub fn menu(&self) -> MenuState {
        self.nav.menu()
    }

    pub fn state(&self) -> CognitiveState {
        self.ctx.state
    }

    pub fn reading(&self) -> CognitiveReading {
        self.ctx.reading
    }

    pub fn params(&self) -> &ParameterStore {
        &self.ctx.params
    }

    pub fn session(&self) -> &TrainingSession {
        &self.ctx.session
    }

    pub fn stats(&self) -> &Statistics {
        &self.ctx.stats
    }

    /// Display layout chosen by the last tick.
    pub fn frame(&self) -> Frame {
        self.ctx.commands.frame
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Map a session transition to audio, statistics and an event.
    fn apply_session_signal(
        &mut self,
        signal: SessionSignal,
        hw: &mut impl AudioPort,
        sink: &mut impl EventSink,
    ) {
        match signal {
            SessionSignal::Started(objective) => {
                info!("SESSION | started, objective {}", objective.label());
                hw.play_success();
            }
            SessionSignal::LevelUp(level) => {
                info!("SESSION | level {}", level);
                hw.play_success();
            }
            SessionSignal::Completed { duration_secs } => {
                info!("SESSION | completed in {}s", duration_secs);
                self.ctx.stats.on_session_complete(duration_secs);
                hw.play_success();
            }
            SessionSignal::Failed { duration_secs } => {
                info!("SESSION | failed after {}s", duration_secs);
                self.ctx.stats.on_session_complete(duration_secs);
                hw.play_error();
            }
            SessionSignal::ObjectiveChanged(_) | SessionSignal::Cancelled | SessionSignal::Reset => {
                hw.play_beep();
            }
        }
        sink.emit(&AppEvent::Session(signal));
    }

    /// Translate the handler's commands into port calls.
    fn render(&self, hw: &mut impl PanelPorts) {
        let ctx = &self.ctx;
        match ctx.commands.frame {
            Frame::Monitoring => hw.render_monitoring(&ctx.reading, ctx.state),
            Frame::Config(param) => hw.render_config(param, &ctx.params.thresholds()),
            Frame::Training { elapsed_secs } => hw.render_training(&ctx.session, elapsed_secs),
            Frame::History { uptime_secs } => hw.render_history(&ctx.stats, uptime_secs),
        }
        hw.set_pattern(&ctx.commands.pattern);
        let (r, g, b) = ctx.commands.indicator;
        hw.set_indicator_color(r, g, b);
    }
}
