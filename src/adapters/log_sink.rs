//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (the serial console on the device, stderr on the host).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::training::SessionSignal;

/// Adapter that logs every [`AppEvent`] as one line.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(mode) => {
                info!("START | initial_mode={:?}", mode);
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {:?} -> {:?}", from, to);
            }
            AppEvent::OverlayChanged(Some(param)) => {
                info!("OVERLAY | editing {}", param.label());
            }
            AppEvent::OverlayChanged(None) => {
                info!("OVERLAY | closed");
            }
            AppEvent::ThresholdChanged { param, value } => {
                info!("THRESHOLD | {} = {:.1}", param.label(), value);
            }
            AppEvent::CognitiveStateChanged { from, to } => {
                info!("STATE | {} -> {}", from.label(), to.label());
            }
            AppEvent::Session(signal) => match signal {
                SessionSignal::ObjectiveChanged(o) => info!("SESSION | objective={}", o.label()),
                SessionSignal::Started(o) => info!("SESSION | started objective={}", o.label()),
                SessionSignal::Cancelled => info!("SESSION | cancelled"),
                SessionSignal::Reset => info!("SESSION | reset"),
                SessionSignal::LevelUp(level) => info!("SESSION | level={}", level),
                SessionSignal::Completed { duration_secs } => {
                    info!("SESSION | completed duration={}s", duration_secs);
                }
                SessionSignal::Failed { duration_secs } => {
                    info!("SESSION | failed duration={}s", duration_secs);
                }
            },
            AppEvent::StatisticsReset => {
                info!("STATS | reset");
            }
            AppEvent::EventsDropped(count) => {
                warn!("EVENTS | dropped={}", count);
            }
        }
    }
}
