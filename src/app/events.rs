//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use serde::Serialize;

use crate::classifier::CognitiveState;
use crate::fsm::Mode;
use crate::params::ParamId;
use crate::training::SessionSignal;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AppEvent {
    /// The service has started (carries the initial mode).
    Started(Mode),

    /// The menu stepped to another mode.
    ModeChanged { from: Mode, to: Mode },

    /// The edit overlay opened, advanced, or (with `None`) closed.
    OverlayChanged(Option<ParamId>),

    /// A threshold was stepped; `value` is the clamped result.
    ThresholdChanged { param: ParamId, value: f32 },

    /// The classifier produced a different state than last tick.
    CognitiveStateChanged {
        from: CognitiveState,
        to: CognitiveState,
    },

    /// A training session transition.
    Session(SessionSignal),

    /// The statistics were cleared from the History view.
    StatisticsReset,

    /// Button edges lost to a full queue since the last report.
    EventsDropped(u32),
}
