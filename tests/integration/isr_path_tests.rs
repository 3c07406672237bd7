//! The process-wide interrupt path: `button_isr_handler` filtering edges
//! through `PANEL_DEBOUNCER` into `BUTTON_EVENTS`, drained by the tick.
//!
//! These statics are shared by the whole test binary, so only this file
//! touches them.

use crate::mock_hw::Rig;

use neurosync::config::SystemConfig;
use neurosync::drivers::button::{Button, PANEL_DEBOUNCER, button_isr_handler};
use neurosync::events::{self, BUTTON_EVENTS};
use neurosync::fsm::Mode;

fn clear_isr_state() {
    PANEL_DEBOUNCER.set_window(200);
    PANEL_DEBOUNCER.reset();
    while events::pop_event().is_some() {}
    BUTTON_EVENTS.take_dropped();
}

#[test]
fn isr_edges_drive_the_service_through_the_shared_queue() {
    clear_isr_state();
    let config = SystemConfig {
        debounce_window_ms: 1_000,
        ..SystemConfig::default()
    };
    let mut rig = Rig::with_config(config, (50.0, 5.0));
    // The service leaves the ISR-side window alone.
    assert_eq!(PANEL_DEBOUNCER.window_ms(), 200);

    button_isr_handler(Button::Next, 1_000);
    // Another button inside the same window is dropped.
    button_isr_handler(Button::Set, 1_100);
    assert_eq!(events::queue_len(), 1);

    rig.app.tick(&BUTTON_EVENTS, &mut rig.hw, &mut rig.sink, 1_050);
    assert_eq!(rig.app.mode(), Mode::ConfigView);
    assert_eq!(rig.app.menu().overlay, None);
    assert_eq!(events::queue_len(), 0);

    // Once the window has passed the next edge is accepted.
    button_isr_handler(Button::Back, 1_200);
    assert_eq!(events::queue_len(), 1);
    rig.app.tick(&BUTTON_EVENTS, &mut rig.hw, &mut rig.sink, 1_250);
    assert_eq!(rig.app.mode(), Mode::Monitoring);
    assert!(BUTTON_EVENTS.is_empty());
    assert_eq!(BUTTON_EVENTS.take_dropped(), 0);
}
