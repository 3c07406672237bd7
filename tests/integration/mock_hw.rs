//! Mock panel adapter for integration tests.
//!
//! Records every output call so tests can assert on the full history
//! without touching real GPIO/PWM/I2C.  The reading and the held state of
//! the Next button are plain fields the test sets.

use neurosync::app::events::AppEvent;
use neurosync::app::ports::{
    AudioPort, DisplayPort, EventSink, InputPort, PatternPort, SensorPort,
};
use neurosync::app::service::AppService;
use neurosync::classifier::{CognitiveReading, CognitiveState};
use neurosync::config::SystemConfig;
use neurosync::drivers::button::{Button, ButtonEvent};
use neurosync::drivers::led_matrix::Grid;
use neurosync::drivers::status_led::Rgb;
use neurosync::events::{EVENT_QUEUE_CAP, EventQueue};
use neurosync::params::{ParamId, Thresholds};
use neurosync::stats::Statistics;
use neurosync::training::{SessionStatus, TrainingSession};

/// Control period used by the rig.
pub const TICK_MS: u32 = 50;

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum PanelCall {
    Monitoring {
        attention: f32,
        relaxation: f32,
        state: CognitiveState,
    },
    Config {
        param: ParamId,
        value: f32,
    },
    Training {
        status: SessionStatus,
        level: u8,
        score: u32,
        elapsed_secs: u32,
    },
    History {
        sessions: u32,
        uptime_secs: u32,
    },
    Pattern(Grid),
    Indicator(Rgb),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Success,
    Error,
    Beep,
}

// ── MockPanel ─────────────────────────────────────────────────

pub struct MockPanel {
    pub reading: (f32, f32),
    pub next_held: bool,
    pub calls: Vec<PanelCall>,
    pub cues: Vec<Cue>,
    pub last_update_ms: Option<u32>,
}

#[allow(dead_code)]
impl MockPanel {
    pub fn new(reading: (f32, f32)) -> Self {
        Self {
            reading,
            next_held: false,
            calls: Vec::new(),
            cues: Vec::new(),
            last_update_ms: None,
        }
    }

    /// Most recent display frame.
    pub fn last_frame(&self) -> Option<&PanelCall> {
        self.calls.iter().rev().find(|c| {
            !matches!(c, PanelCall::Pattern(_) | PanelCall::Indicator(_))
        })
    }

    pub fn last_pattern(&self) -> Option<Grid> {
        self.calls.iter().rev().find_map(|c| match c {
            PanelCall::Pattern(g) => Some(*g),
            _ => None,
        })
    }

    pub fn last_indicator(&self) -> Option<Rgb> {
        self.calls.iter().rev().find_map(|c| match c {
            PanelCall::Indicator(rgb) => Some(*rgb),
            _ => None,
        })
    }

    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }
}

impl SensorPort for MockPanel {
    fn next_reading(&mut self) -> (f32, f32) {
        self.reading
    }
}

impl DisplayPort for MockPanel {
    fn render_monitoring(&mut self, reading: &CognitiveReading, state: CognitiveState) {
        self.calls.push(PanelCall::Monitoring {
            attention: reading.attention(),
            relaxation: reading.relaxation(),
            state,
        });
    }

    fn render_config(&mut self, param: ParamId, thresholds: &Thresholds) {
        self.calls.push(PanelCall::Config {
            param,
            value: thresholds.get(param),
        });
    }

    fn render_training(&mut self, session: &TrainingSession, elapsed_secs: u32) {
        self.calls.push(PanelCall::Training {
            status: session.status(),
            level: session.level(),
            score: session.score(),
            elapsed_secs,
        });
    }

    fn render_history(&mut self, stats: &Statistics, uptime_secs: u32) {
        self.calls.push(PanelCall::History {
            sessions: stats.completed_sessions(),
            uptime_secs,
        });
    }
}

impl PatternPort for MockPanel {
    fn set_pattern(&mut self, pattern: &Grid) {
        self.calls.push(PanelCall::Pattern(*pattern));
    }

    fn set_indicator_color(&mut self, r: u8, g: u8, b: u8) {
        self.calls.push(PanelCall::Indicator((r, g, b)));
    }
}

impl AudioPort for MockPanel {
    fn play_success(&mut self) {
        self.cues.push(Cue::Success);
    }

    fn play_error(&mut self) {
        self.cues.push(Cue::Error);
    }

    fn play_beep(&mut self) {
        self.cues.push(Cue::Beep);
    }

    fn update(&mut self, now_ms: u32) {
        self.last_update_ms = Some(now_ms);
    }
}

impl InputPort for MockPanel {
    fn is_held(&mut self, button: Button) -> bool {
        button == Button::Next && self.next_held
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// Service plus mocks plus a private queue, on a simulated 50 ms clock.
pub struct Rig {
    pub app: AppService,
    pub hw: MockPanel,
    pub sink: RecordingSink,
    pub queue: EventQueue<EVENT_QUEUE_CAP>,
    pub now_ms: u32,
}

#[allow(dead_code)]
impl Rig {
    pub fn new(reading: (f32, f32)) -> Self {
        Self::with_config(SystemConfig::default(), reading)
    }

    pub fn with_config(config: SystemConfig, reading: (f32, f32)) -> Self {
        let mut app = AppService::new(config, 0);
        let mut sink = RecordingSink::default();
        app.start(&mut sink);
        Self {
            app,
            hw: MockPanel::new(reading),
            sink,
            queue: EventQueue::new(),
            now_ms: 0,
        }
    }

    pub fn tick(&mut self) {
        self.now_ms = self.now_ms.wrapping_add(TICK_MS);
        self.app
            .tick(&self.queue, &mut self.hw, &mut self.sink, self.now_ms);
    }

    pub fn ticks(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Queue one debounced press and run the tick that drains it.
    pub fn press(&mut self, event: ButtonEvent) {
        assert!(self.queue.push(event));
        self.tick();
    }

    /// Advance the clock without ticking (the loop was busy elsewhere).
    pub fn skip_ms(&mut self, ms: u32) {
        self.now_ms = self.now_ms.wrapping_add(ms);
    }
}
