//! Concrete mode handler functions and table builder.
//!
//! Each mode is three plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!            Next                Next              Next
//!  MONITORING ───▶ CONFIG VIEW ───▶ TRAINING ───▶ HISTORY
//!      ▲                                              │
//!      └──────────────────── Next ────────────────────┘
//!                    (Back walks the ring backwards)
//!
//!  any mode except TRAINING ──[Set]──▶ edit overlay (CONFIG VIEW handler)
//! ```

use log::{debug, info};

use super::context::{Frame, ModeContext};
use super::{Mode, ModeDescriptor};
use crate::classifier::CognitiveState;
use crate::drivers::led_matrix;
use crate::drivers::status_led;
use crate::training::{Objective, SessionStatus};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static mode table.  Called once at startup.
pub fn build_mode_table() -> [ModeDescriptor; Mode::COUNT] {
    [
        // Index 0 — Monitoring
        ModeDescriptor {
            id: Mode::Monitoring,
            name: "Monitoring",
            on_enter: Some(monitoring_enter),
            on_exit: None,
            on_update: monitoring_update,
        },
        // Index 1 — ConfigView
        ModeDescriptor {
            id: Mode::ConfigView,
            name: "Config",
            on_enter: Some(config_enter),
            on_exit: None,
            on_update: config_update,
        },
        // Index 2 — Training
        ModeDescriptor {
            id: Mode::Training,
            name: "Training",
            on_enter: Some(training_enter),
            on_exit: Some(training_exit),
            on_update: training_update,
        },
        // Index 3 — History
        ModeDescriptor {
            id: Mode::History,
            name: "History",
            on_enter: Some(history_enter),
            on_exit: None,
            on_update: history_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  MONITORING
// ═══════════════════════════════════════════════════════════════════════════

fn monitoring_enter(ctx: &mut ModeContext) {
    ctx.commands.frame = Frame::Monitoring;
}

fn monitoring_update(ctx: &mut ModeContext) {
    let reading = ctx.reading;
    let bands = reading.bands();
    debug!(
        "MONITOR att={:.2} rel={:.2} state={:?}",
        reading.attention(),
        reading.relaxation(),
        ctx.state
    );
    debug!(
        "BANDS alpha={:.2} beta={:.2} theta={:.2} delta={:.2}",
        bands.alpha, bands.beta, bands.theta, bands.delta
    );

    let (pattern, indicator) = state_visuals(ctx.state);
    ctx.commands.pattern = pattern;
    ctx.commands.indicator = indicator;
    ctx.commands.frame = Frame::Monitoring;

    ctx.stats.record(&reading);
}

/// Face and indicator colour for a cognitive state.
pub fn state_visuals(state: CognitiveState) -> (led_matrix::Grid, status_led::Rgb) {
    match state {
        CognitiveState::Distracted => (led_matrix::FACE_SAD, status_led::YELLOW),
        CognitiveState::Normal => (led_matrix::FACE_NEUTRAL, status_led::BLUE),
        CognitiveState::Concentrated => (led_matrix::FACE_HAPPY, status_led::GREEN),
        CognitiveState::DeepRelaxation => (led_matrix::FACE_NEUTRAL, status_led::CYAN),
        CognitiveState::Flow => (led_matrix::FACE_HAPPY, status_led::TEAL),
        CognitiveState::Anxious => (led_matrix::FACE_SAD, status_led::RED),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  CONFIG VIEW (also the edit overlay)
// ═══════════════════════════════════════════════════════════════════════════

fn config_enter(ctx: &mut ModeContext) {
    ctx.commands.frame = Frame::Config(ctx.menu.edited_param());
}

fn config_update(ctx: &mut ModeContext) {
    let param = ctx.menu.edited_param();
    ctx.commands.pattern = led_matrix::fraction_bar(ctx.params.fraction(param));
    ctx.commands.indicator = if param.is_attention() {
        status_led::BLUE
    } else {
        status_led::CYAN
    };
    ctx.commands.frame = Frame::Config(param);
}

// ═══════════════════════════════════════════════════════════════════════════
//  TRAINING
// ═══════════════════════════════════════════════════════════════════════════

fn training_enter(ctx: &mut ModeContext) {
    info!(
        "TRAINING | objective {} ({:?})",
        ctx.session.objective().label(),
        ctx.session.status()
    );
    ctx.commands.frame = Frame::Training {
        elapsed_secs: ctx.session.elapsed_secs(ctx.now_ms),
    };
}

fn training_exit(ctx: &mut ModeContext) {
    if ctx.session.status() == SessionStatus::InProgress {
        info!(
            "TRAINING | leaving view after {:.1}s; session keeps running",
            ctx.secs_in_view()
        );
    }
}

fn training_update(ctx: &mut ModeContext) {
    let reading = ctx.reading;
    let thresholds = ctx.params.thresholds();

    if let Some(signal) = ctx.session.tick(&reading, &thresholds, ctx.now_ms) {
        ctx.session_signal = Some(signal);
    }
    ctx.stats.record(&reading);

    let session = &ctx.session;
    let (pattern, indicator) = match session.status() {
        SessionStatus::NotStarted => objective_visuals(session.objective()),
        SessionStatus::InProgress => (
            led_matrix::level_bar(session.level(), session.level_max()),
            objective_visuals(session.objective()).1,
        ),
        SessionStatus::Completed => (led_matrix::FACE_HAPPY, status_led::GREEN),
        SessionStatus::Failed => (led_matrix::FACE_SAD, status_led::RED),
    };
    ctx.commands.pattern = pattern;
    ctx.commands.indicator = indicator;
    ctx.commands.frame = Frame::Training {
        elapsed_secs: session.elapsed_secs(ctx.now_ms),
    };
}

fn objective_visuals(objective: Objective) -> (led_matrix::Grid, status_led::Rgb) {
    match objective {
        Objective::Attention => (led_matrix::FOCUS, status_led::BLUE),
        Objective::Relaxation => (led_matrix::RELAXATION, status_led::CYAN),
        Objective::Flow => (led_matrix::WAVES, status_led::GREEN),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  HISTORY
// ═══════════════════════════════════════════════════════════════════════════

fn history_enter(ctx: &mut ModeContext) {
    info!(
        "HISTORY | {} samples, {} sessions, last {}s",
        ctx.stats.sample_count(),
        ctx.stats.completed_sessions(),
        ctx.stats.last_session_duration_secs()
    );
    ctx.commands.indicator = status_led::PURPLE;
}

fn history_update(ctx: &mut ModeContext) {
    let stats = &ctx.stats;
    ctx.commands.pattern = led_matrix::history(
        stats.mean_attention(),
        stats.mean_relaxation(),
        stats.completed_sessions(),
    );
    ctx.commands.indicator = status_led::PURPLE;
    ctx.commands.frame = Frame::History {
        uptime_secs: stats.uptime_secs(ctx.now_ms),
    };
}
