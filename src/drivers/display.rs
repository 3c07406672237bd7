//! Three-line text frames for the 128×64 OLED.
//!
//! Every view redraws the whole screen: a title line and two value lines,
//! each at most [`LINE_CAP`] bytes.  The layout functions here are pure; a
//! [`TextDisplay`] implementation pushes the finished frame to the panel.

use core::fmt::{self, Write};

use heapless::String;

use crate::classifier::{CognitiveReading, CognitiveState};
use crate::error::HardwareError;
use crate::params::{ParamId, Thresholds, UNKNOWN_PARAMETER};
use crate::stats::Statistics;
use crate::training::{SessionStatus, TrainingSession};

/// Bytes per display line.
pub const LINE_CAP: usize = 32;

pub type Line = String<LINE_CAP>;

/// A full-screen redraw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameText {
    pub title: Line,
    pub line1: Line,
    pub line2: Line,
}

impl FrameText {
    pub fn lines(&self) -> [&str; 3] {
        [self.title.as_str(), self.line1.as_str(), self.line2.as_str()]
    }
}

impl fmt::Display for FrameText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.title, self.line1, self.line2)
    }
}

/// A panel that can show a [`FrameText`].
pub trait TextDisplay {
    fn draw(&mut self, frame: &FrameText) -> Result<(), HardwareError>;
}

/// Writer that keeps as many whole chars as fit and drops the rest.
struct Truncating(Line);

impl Write for Truncating {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.0.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Format into a line, truncating at capacity.
fn line(args: fmt::Arguments<'_>) -> Line {
    let mut w = Truncating(Line::new());
    // Truncating never reports an error.
    let _ = w.write_fmt(args);
    w.0
}

fn frame(title: &str, line1: Line, line2: Line) -> FrameText {
    FrameText {
        title: line(format_args!("{title}")),
        line1,
        line2,
    }
}

// ── Layouts ────────────────────────────────────────────────────

pub fn monitoring(reading: &CognitiveReading, state: CognitiveState) -> FrameText {
    frame(
        "NeuroSync - Monitor",
        line(format_args!(
            "Att: {:.1}% Rel: {:.1}",
            reading.attention(),
            reading.relaxation()
        )),
        line(format_args!("State: {}", state.label())),
    )
}

pub fn config(param: ParamId, t: &Thresholds) -> FrameText {
    config_by_index(param.index(), t)
}

/// Config view for a raw parameter index; unknown indices show a
/// placeholder instead of a value.
pub fn config_by_index(idx: usize, t: &Thresholds) -> FrameText {
    let (label, value) = match ParamId::from_index(idx) {
        Some(p) if p.is_attention() => (p.label(), line(format_args!("Value: {:.1}%", t.get(p)))),
        Some(p) => (p.label(), line(format_args!("Value: {:.1}", t.get(p)))),
        None => (UNKNOWN_PARAMETER, line(format_args!("Error"))),
    };
    frame("NeuroSync - Config", line(format_args!("{label}")), value)
}

pub fn training(session: &TrainingSession, elapsed_secs: u32) -> FrameText {
    let status = match session.status() {
        SessionStatus::NotStarted => "Ready",
        SessionStatus::InProgress => "Go",
        SessionStatus::Completed => "Done",
        SessionStatus::Failed => "Failed",
    };
    frame(
        "NeuroSync - Training",
        line(format_args!(
            "{} Lv:{}/{} {}",
            session.objective().label(),
            session.level(),
            session.level_max(),
            status
        )),
        line(format_args!(
            "Pts: {} Time: {}s",
            session.score(),
            elapsed_secs
        )),
    )
}

pub fn history(stats: &Statistics, uptime_secs: u32) -> FrameText {
    frame(
        "NeuroSync - History",
        line(format_args!(
            "Att: {:.1}% Rx: {:.1}",
            stats.mean_attention(),
            stats.mean_relaxation()
        )),
        line(format_args!(
            "Sessions: {} {:02}m{:02}s",
            stats.completed_sessions(),
            uptime_secs / 60,
            uptime_secs % 60
        )),
    )
}
