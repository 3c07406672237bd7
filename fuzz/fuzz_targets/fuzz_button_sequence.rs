//! Fuzz target: button and sensor sequences through `AppService`
//!
//! Each input byte is one control tick:
//! - bits 0–1: button (0 none, 1 Next, 2 Back, 3 Set)
//! - bit 2: Next held (the statistics reset chord)
//! - bits 3–7: reading, mapped onto both scales
//!
//! Verifies:
//! - No panics under arbitrary input
//! - Threshold bands never collapse
//! - Session level stays within 1..=level_max
//! - Means stay within the sensor scales
//!
//! cargo fuzz run fuzz_button_sequence

#![no_main]

use libfuzzer_sys::fuzz_target;
use neurosync::app::events::AppEvent;
use neurosync::app::ports::{
    AudioPort, DisplayPort, EventSink, InputPort, PatternPort, SensorPort,
};
use neurosync::app::service::AppService;
use neurosync::classifier::{CognitiveReading, CognitiveState};
use neurosync::config::SystemConfig;
use neurosync::drivers::button::{Button, ButtonEvent};
use neurosync::drivers::led_matrix::Grid;
use neurosync::events::EventQueue;
use neurosync::params::{ParamId, Thresholds};
use neurosync::stats::Statistics;
use neurosync::training::TrainingSession;

// ── Null panel ────────────────────────────────────────────────

struct Panel {
    reading: (f32, f32),
    next_held: bool,
}

impl SensorPort for Panel {
    fn next_reading(&mut self) -> (f32, f32) {
        self.reading
    }
}

impl DisplayPort for Panel {
    fn render_monitoring(&mut self, _: &CognitiveReading, _: CognitiveState) {}
    fn render_config(&mut self, _: ParamId, _: &Thresholds) {}
    fn render_training(&mut self, _: &TrainingSession, _: u32) {}
    fn render_history(&mut self, _: &Statistics, _: u32) {}
}

impl PatternPort for Panel {
    fn set_pattern(&mut self, _: &Grid) {}
    fn set_indicator_color(&mut self, _: u8, _: u8, _: u8) {}
}

impl AudioPort for Panel {
    fn play_success(&mut self) {}
    fn play_error(&mut self) {}
    fn play_beep(&mut self) {}
    fn update(&mut self, _: u32) {}
}

impl InputPort for Panel {
    fn is_held(&mut self, button: Button) -> bool {
        button == Button::Next && self.next_held
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let config = SystemConfig {
        points_per_level: 3,
        session_timeout_secs: 5,
        ..SystemConfig::default()
    };
    let mut app = AppService::new(config, 0);
    let mut sink = Discard;
    let queue: EventQueue<8> = EventQueue::new();
    let mut panel = Panel {
        reading: (0.0, 0.0),
        next_held: false,
    };
    app.start(&mut sink);

    let mut now = 0u32;
    for &byte in data {
        match byte & 0b11 {
            1 => {
                queue.push(ButtonEvent::Next);
            }
            2 => {
                queue.push(ButtonEvent::Back);
            }
            3 => {
                queue.push(ButtonEvent::Set);
            }
            _ => {}
        }
        panel.next_held = byte & 0b100 != 0;
        let level = f32::from(byte >> 3) / 31.0;
        panel.reading = (level * 100.0, level * 10.0);

        now = now.wrapping_add(50);
        app.tick(&queue, &mut panel, &mut sink, now);

        let t = app.params().thresholds();
        assert!(t.attention_low() < t.attention_high());
        assert!(t.relaxation_low() < t.relaxation_high());
        let session = app.session();
        assert!(session.level() >= 1 && session.level() <= session.level_max());
        let stats = app.stats();
        assert!((0.0..=100.001).contains(&stats.mean_attention()));
        assert!((0.0..=10.001).contains(&stats.mean_relaxation()));
    }
});
