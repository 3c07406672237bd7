//! Integration tests for the buttons → AppService → panel pipeline.
//!
//! Menu navigation, the edit overlay, classification and the statistics
//! reset chord, all driven through the event queue against mock ports.

use crate::mock_hw::{Cue, PanelCall, Rig, TICK_MS};

use neurosync::app::events::AppEvent;
use neurosync::classifier::CognitiveState;
use neurosync::drivers::button::ButtonEvent;
use neurosync::drivers::led_matrix::{self, lit_count};
use neurosync::drivers::status_led;
use neurosync::events::EventQueue;
use neurosync::fsm::Mode;
use neurosync::fsm::context::Frame;
use neurosync::params::ParamId;

// ── Start-up and monitoring ──────────────────────────────────

#[test]
fn starts_in_monitoring_and_renders_reading() {
    let mut rig = Rig::new((75.0, 8.0));
    assert_eq!(rig.sink.events, [AppEvent::Started(Mode::Monitoring)]);

    rig.tick();

    assert_eq!(rig.app.state(), CognitiveState::Flow);
    assert_eq!(
        rig.hw.last_frame(),
        Some(&PanelCall::Monitoring {
            attention: 75.0,
            relaxation: 8.0,
            state: CognitiveState::Flow,
        })
    );
    assert_eq!(rig.hw.last_pattern(), Some(led_matrix::FACE_HAPPY));
    assert_eq!(rig.hw.last_indicator(), Some(status_led::TEAL));
    assert_eq!(rig.hw.last_update_ms, Some(TICK_MS));
    assert!(rig.sink.contains(&AppEvent::CognitiveStateChanged {
        from: CognitiveState::Distracted,
        to: CognitiveState::Flow,
    }));
}

#[test]
fn state_change_is_reported_once_per_change() {
    let mut rig = Rig::new((50.0, 5.0));
    rig.ticks(5);
    rig.hw.reading = (50.0, 8.0);
    rig.ticks(5);

    let changes = rig
        .sink
        .count(|e| matches!(e, AppEvent::CognitiveStateChanged { .. }));
    assert_eq!(changes, 2);
    assert_eq!(rig.app.state(), CognitiveState::DeepRelaxation);
    assert_eq!(rig.hw.last_indicator(), Some(status_led::CYAN));
}

#[test]
fn monitoring_records_statistics() {
    let mut rig = Rig::new((40.0, 4.0));
    rig.ticks(10);
    let stats = rig.app.stats();
    assert_eq!(stats.sample_count(), 10);
    assert!((stats.mean_attention() - 40.0).abs() < 1e-3);
    assert!((stats.max_relaxation() - 4.0).abs() < 1e-3);
}

// ── Navigation ───────────────────────────────────────────────

#[test]
fn four_backs_return_to_monitoring_with_a_beep_each() {
    let mut rig = Rig::new((50.0, 5.0));
    let mut modes = Vec::new();
    for _ in 0..4 {
        rig.press(ButtonEvent::Back);
        modes.push(rig.app.mode());
    }
    assert_eq!(
        modes,
        [Mode::History, Mode::Training, Mode::ConfigView, Mode::Monitoring]
    );
    assert_eq!(rig.hw.take_cues(), [Cue::Beep; 4]);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::ModeChanged { .. })),
        4
    );
}

#[test]
fn next_walks_the_ring_until_training_claims_it() {
    let mut rig = Rig::new((50.0, 5.0));
    rig.press(ButtonEvent::Next);
    rig.press(ButtonEvent::Next);
    assert_eq!(rig.app.mode(), Mode::Training);

    // A session that has not started owns Next.
    rig.press(ButtonEvent::Next);
    assert_eq!(rig.app.mode(), Mode::Training);
}

#[test]
fn back_from_monitoring_reaches_history() {
    let mut rig = Rig::new((50.0, 5.0));
    rig.press(ButtonEvent::Back);
    assert_eq!(rig.app.mode(), Mode::History);
    assert!(matches!(
        rig.hw.last_frame(),
        Some(PanelCall::History { sessions: 0, .. })
    ));
    assert_eq!(rig.hw.last_indicator(), Some(status_led::PURPLE));
}

#[test]
fn config_view_shows_first_parameter_read_only() {
    let mut rig = Rig::new((50.0, 5.0));
    rig.press(ButtonEvent::Next);
    assert_eq!(rig.app.frame(), Frame::Config(ParamId::AttentionLow));
    assert_eq!(
        rig.hw.last_frame(),
        Some(&PanelCall::Config {
            param: ParamId::AttentionLow,
            value: 30.0
        })
    );
    assert_eq!(rig.hw.last_pattern().map(|g| lit_count(&g)), Some(7));

    // Next leaves the view instead of editing.
    rig.press(ButtonEvent::Next);
    assert_eq!(rig.app.mode(), Mode::Training);
    assert!((rig.app.params().get(ParamId::AttentionLow) - 30.0).abs() < 1e-6);
}

#[test]
fn views_other_than_monitoring_and_training_do_not_sample() {
    let mut rig = Rig::new((50.0, 5.0));
    rig.press(ButtonEvent::Back); // History
    rig.ticks(5);
    rig.press(ButtonEvent::Back); // Training
    assert_eq!(rig.app.mode(), Mode::Training);
    rig.press(ButtonEvent::Back); // ConfigView
    rig.ticks(5);
    assert_eq!(rig.app.mode(), Mode::ConfigView);
    // One sample from the Training tick that drained the press.
    assert_eq!(rig.app.stats().sample_count(), 1);
}

// ── Edit overlay ─────────────────────────────────────────────

#[test]
fn overlay_edits_thresholds_and_closes_after_last() {
    let mut rig = Rig::new((50.0, 5.0));
    rig.press(ButtonEvent::Set);
    assert_eq!(rig.app.mode(), Mode::Monitoring);
    assert_eq!(rig.app.frame(), Frame::Config(ParamId::AttentionLow));

    rig.press(ButtonEvent::Next);
    rig.press(ButtonEvent::Next);
    rig.press(ButtonEvent::Back);
    assert!((rig.app.params().get(ParamId::AttentionLow) - 35.0).abs() < 1e-6);
    assert!(rig.sink.contains(&AppEvent::ThresholdChanged {
        param: ParamId::AttentionLow,
        value: 40.0
    }));
    assert_eq!(
        rig.hw.last_frame(),
        Some(&PanelCall::Config {
            param: ParamId::AttentionLow,
            value: 35.0
        })
    );

    for _ in 0..4 {
        rig.press(ButtonEvent::Set);
    }
    assert_eq!(rig.app.menu().overlay, None);
    assert_eq!(rig.app.mode(), Mode::Monitoring);
    assert!(rig.sink.contains(&AppEvent::OverlayChanged(None)));
    assert!(matches!(
        rig.hw.last_frame(),
        Some(PanelCall::Monitoring { .. })
    ));
    // Open, three edits, three advances, close: one beep each.
    assert_eq!(rig.hw.take_cues().len(), 8);
}

#[test]
fn overlay_edits_clamp_at_bounds() {
    let mut rig = Rig::new((50.0, 5.0));
    rig.press(ButtonEvent::Set); // AttentionLow
    rig.press(ButtonEvent::Set); // AttentionHigh
    for _ in 0..20 {
        rig.press(ButtonEvent::Next);
    }
    assert!((rig.app.params().get(ParamId::AttentionHigh) - 100.0).abs() < 1e-6);

    rig.press(ButtonEvent::Set); // RelaxationLow
    for _ in 0..20 {
        rig.press(ButtonEvent::Next);
    }
    let t = rig.app.params().thresholds();
    assert!((t.relaxation_low() - 6.5).abs() < 1e-6);
    assert!(t.relaxation_low() < t.relaxation_high());
}

#[test]
fn raised_threshold_changes_classification() {
    let mut rig = Rig::new((72.0, 5.0));
    rig.tick();
    assert_eq!(rig.app.state(), CognitiveState::Concentrated);

    rig.press(ButtonEvent::Set);
    rig.press(ButtonEvent::Set); // AttentionHigh
    rig.press(ButtonEvent::Next); // 75
    assert_eq!(rig.app.state(), CognitiveState::Normal);
}

#[test]
fn overlay_works_over_history() {
    let mut rig = Rig::new((50.0, 5.0));
    rig.press(ButtonEvent::Back);
    rig.press(ButtonEvent::Set);
    assert_eq!(rig.app.mode(), Mode::History);
    assert_eq!(rig.app.frame(), Frame::Config(ParamId::AttentionLow));
    assert_eq!(rig.hw.last_indicator(), Some(status_led::BLUE));
}

// ── Statistics reset chord ───────────────────────────────────

#[test]
fn set_with_next_held_in_history_resets_statistics() {
    let mut rig = Rig::new((60.0, 6.0));
    rig.ticks(20);
    assert_eq!(rig.app.stats().sample_count(), 20);

    rig.press(ButtonEvent::Back);
    rig.hw.take_cues();
    rig.hw.next_held = true;
    rig.press(ButtonEvent::Set);
    rig.hw.next_held = false;

    assert_eq!(rig.app.stats().sample_count(), 0);
    assert!(rig.app.stats().mean_attention().abs() < 1e-6);
    assert_eq!(rig.app.menu().overlay, None);
    assert_eq!(rig.hw.take_cues(), [Cue::Success]);
    assert!(rig.sink.contains(&AppEvent::StatisticsReset));
    assert_eq!(
        rig.hw.last_frame(),
        Some(&PanelCall::History {
            sessions: 0,
            uptime_secs: 0
        })
    );
}

#[test]
fn set_without_chord_in_history_opens_overlay() {
    let mut rig = Rig::new((60.0, 6.0));
    rig.ticks(3);
    rig.press(ButtonEvent::Back);
    rig.press(ButtonEvent::Set);
    assert_eq!(rig.app.stats().sample_count(), 3);
    assert!(rig.app.menu().overlay.is_some());
}

#[test]
fn chord_outside_history_is_ordinary_set() {
    let mut rig = Rig::new((60.0, 6.0));
    rig.ticks(3);
    rig.hw.next_held = true;
    rig.press(ButtonEvent::Set);
    assert!(rig.app.menu().overlay.is_some());
    assert_eq!(rig.app.stats().sample_count(), 3);
}

// ── Queue behaviour ──────────────────────────────────────────

#[test]
fn queued_presses_are_handled_in_order_within_one_tick() {
    let mut rig = Rig::new((50.0, 5.0));
    rig.queue.push(ButtonEvent::Next);
    rig.queue.push(ButtonEvent::Next);
    rig.queue.push(ButtonEvent::Back);
    rig.tick();
    assert_eq!(rig.app.mode(), Mode::ConfigView);
    assert!(rig.queue.is_empty());
}

#[test]
fn overflow_is_reported_as_dropped_events() {
    let mut rig = Rig::new((50.0, 5.0));
    for _ in 0..20 {
        rig.queue.push(ButtonEvent::Set);
    }
    rig.tick();
    assert!(rig.sink.contains(&AppEvent::EventsDropped(4)));

    rig.tick();
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::EventsDropped(_))),
        1
    );
}

#[test]
fn service_drains_any_queue_size() {
    let mut rig = Rig::new((50.0, 5.0));
    let small: EventQueue<2> = EventQueue::new();
    small.push(ButtonEvent::Back);
    rig.app.tick(&small, &mut rig.hw, &mut rig.sink, 50);
    assert_eq!(rig.app.mode(), Mode::History);
}
