//! End-to-end training sessions: objective selection, scoring, level-ups,
//! completion, timeout, cancel and restart.

use crate::mock_hw::{Cue, PanelCall, Rig};

use neurosync::app::events::AppEvent;
use neurosync::config::SystemConfig;
use neurosync::drivers::button::ButtonEvent;
use neurosync::drivers::led_matrix::{self, lit_count};
use neurosync::drivers::status_led;
use neurosync::fsm::Mode;
use neurosync::training::{Objective, SessionSignal, SessionStatus};

const HIT: (f32, f32) = (90.0, 5.0);
const MISS: (f32, f32) = (40.0, 5.0);

fn in_training(config: SystemConfig, reading: (f32, f32)) -> Rig {
    let mut rig = Rig::with_config(config, reading);
    rig.press(ButtonEvent::Next);
    rig.press(ButtonEvent::Next);
    assert_eq!(rig.app.mode(), Mode::Training);
    rig.hw.take_cues();
    rig
}

#[test]
fn next_cycles_objective_before_start() {
    let mut rig = in_training(SystemConfig::default(), MISS);
    assert_eq!(rig.hw.last_pattern(), Some(led_matrix::FOCUS));

    rig.press(ButtonEvent::Next);
    assert_eq!(rig.app.session().objective(), Objective::Relaxation);
    assert_eq!(rig.hw.last_pattern(), Some(led_matrix::RELAXATION));
    assert_eq!(rig.hw.last_indicator(), Some(status_led::CYAN));

    rig.press(ButtonEvent::Next);
    rig.press(ButtonEvent::Next);
    assert_eq!(rig.app.session().objective(), Objective::Attention);
    assert_eq!(rig.hw.take_cues(), [Cue::Beep; 3]);
    assert!(rig.sink.contains(&AppEvent::Session(SessionSignal::ObjectiveChanged(
        Objective::Flow
    ))));
}

#[test]
fn set_starts_session_instead_of_opening_overlay() {
    let mut rig = in_training(SystemConfig::default(), MISS);
    rig.press(ButtonEvent::Set);

    assert_eq!(rig.app.menu().overlay, None);
    assert_eq!(rig.app.session().status(), SessionStatus::InProgress);
    assert_eq!(rig.hw.take_cues(), [Cue::Success]);
    assert!(rig.sink.contains(&AppEvent::Session(SessionSignal::Started(
        Objective::Attention
    ))));
    assert_eq!(
        rig.hw.last_frame(),
        Some(&PanelCall::Training {
            status: SessionStatus::InProgress,
            level: 1,
            score: 0,
            elapsed_secs: 0,
        })
    );
}

#[test]
fn fifty_hits_raise_level_exactly_once() {
    let mut rig = in_training(SystemConfig::default(), HIT);
    rig.press(ButtonEvent::Set); // scores on the same tick
    rig.ticks(48);
    assert_eq!(rig.app.session().score(), 49);
    assert_eq!(rig.app.session().level(), 1);

    rig.tick();
    assert_eq!(rig.app.session().score(), 50);
    assert_eq!(rig.app.session().level(), 2);
    assert_eq!(lit_count(&rig.hw.last_pattern().unwrap()), 4);
    assert_eq!(rig.hw.last_indicator(), Some(status_led::BLUE));

    rig.ticks(10);
    let level_ups = rig
        .sink
        .count(|e| matches!(e, AppEvent::Session(SessionSignal::LevelUp(_))));
    assert_eq!(level_ups, 1);
    assert_eq!(rig.hw.take_cues(), [Cue::Success, Cue::Success]);
}

#[test]
fn misses_do_not_score() {
    let mut rig = in_training(SystemConfig::default(), MISS);
    rig.press(ButtonEvent::Set);
    rig.ticks(100);
    assert_eq!(rig.app.session().score(), 0);
    assert_eq!(rig.app.session().level(), 1);
}

#[test]
fn reaching_level_max_completes_and_counts_session() {
    let config = SystemConfig {
        points_per_level: 2,
        level_max: 3,
        ..SystemConfig::default()
    };
    let mut rig = in_training(config, HIT);
    rig.press(ButtonEvent::Set);
    rig.ticks(3);

    let session = rig.app.session();
    assert_eq!(session.status(), SessionStatus::Completed);
    assert_eq!(session.level(), 3);
    assert_eq!(rig.app.stats().completed_sessions(), 1);
    assert!(rig.sink.contains(&AppEvent::Session(SessionSignal::Completed {
        duration_secs: 0
    })));
    assert_eq!(rig.hw.last_pattern(), Some(led_matrix::FACE_HAPPY));
    assert_eq!(rig.hw.last_indicator(), Some(status_led::GREEN));
    // start, level 2, completion
    assert_eq!(rig.hw.take_cues(), [Cue::Success; 3]);

    // Finished sessions stop scoring.
    rig.ticks(10);
    assert_eq!(rig.app.session().score(), 4);
    assert_eq!(rig.app.stats().completed_sessions(), 1);
}

#[test]
fn timeout_below_level_max_fails_with_error_tone() {
    let config = SystemConfig {
        session_timeout_secs: 1,
        ..SystemConfig::default()
    };
    let mut rig = in_training(config, MISS);
    rig.press(ButtonEvent::Set);
    rig.hw.take_cues();

    rig.ticks(19);
    assert_eq!(rig.app.session().status(), SessionStatus::InProgress);
    rig.tick();
    assert_eq!(rig.app.session().status(), SessionStatus::Failed);
    assert_eq!(rig.app.stats().completed_sessions(), 1);
    assert_eq!(rig.app.stats().last_session_duration_secs(), 1);
    assert_eq!(rig.hw.take_cues(), [Cue::Error]);
    assert_eq!(rig.hw.last_pattern(), Some(led_matrix::FACE_SAD));
    assert_eq!(rig.hw.last_indicator(), Some(status_led::RED));

    // Set clears the finished session.
    rig.press(ButtonEvent::Set);
    assert_eq!(rig.app.session().status(), SessionStatus::NotStarted);
    assert_eq!(rig.hw.take_cues(), [Cue::Beep]);
    assert!(rig.sink.contains(&AppEvent::Session(SessionSignal::Reset)));
}

#[test]
fn set_during_session_cancels_and_discards_progress() {
    let mut rig = in_training(SystemConfig::default(), HIT);
    rig.press(ButtonEvent::Set);
    rig.ticks(60);
    assert_eq!(rig.app.session().level(), 2);

    rig.hw.reading = MISS;
    rig.press(ButtonEvent::Set);
    let session = rig.app.session();
    assert_eq!(session.status(), SessionStatus::NotStarted);
    assert_eq!(session.level(), 1);
    assert_eq!(session.score(), 0);
    assert_eq!(rig.app.stats().completed_sessions(), 0);
    assert!(rig.sink.contains(&AppEvent::Session(SessionSignal::Cancelled)));
}

#[test]
fn next_navigates_away_while_running_and_timeout_uses_wall_clock() {
    let config = SystemConfig {
        session_timeout_secs: 2,
        ..SystemConfig::default()
    };
    let mut rig = in_training(config, HIT);
    rig.press(ButtonEvent::Set);

    rig.press(ButtonEvent::Next);
    assert_eq!(rig.app.mode(), Mode::History);
    let score = rig.app.session().score();
    rig.ticks(10);
    assert_eq!(rig.app.session().score(), score);

    rig.skip_ms(5_000);
    rig.press(ButtonEvent::Back);
    assert_eq!(rig.app.mode(), Mode::Training);
    assert_eq!(rig.app.session().status(), SessionStatus::Failed);
    assert_eq!(rig.app.stats().completed_sessions(), 1);
}

#[test]
fn training_ticks_record_statistics() {
    let mut rig = in_training(SystemConfig::default(), HIT);
    let before = rig.app.stats().sample_count();
    rig.ticks(10);
    assert_eq!(rig.app.stats().sample_count(), before + 10);
}

#[test]
fn elapsed_seconds_reach_the_display() {
    let mut rig = in_training(SystemConfig::default(), MISS);
    rig.press(ButtonEvent::Set);
    rig.ticks(40);
    assert_eq!(
        rig.hw.last_frame(),
        Some(&PanelCall::Training {
            status: SessionStatus::InProgress,
            level: 1,
            score: 0,
            elapsed_secs: 2,
        })
    );
}

#[test]
fn zero_points_per_level_falls_back_to_default_rules() {
    let config = SystemConfig {
        points_per_level: 0,
        ..SystemConfig::default()
    };
    let mut rig = in_training(config, HIT);
    rig.press(ButtonEvent::Set);
    rig.ticks(49);
    assert_eq!(rig.app.session().score(), 50);
    assert_eq!(rig.app.session().level(), 2);
}
