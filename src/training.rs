//! Training session state machine.
//!
//! ```text
//!             Set                      level == level_max
//! NotStarted ─────▶ InProgress ───────────────────────────▶ Completed
//!   ▲  │ Next          │  │  timeout, level <  max              │
//!   │  └─(objective)   │  └────────────────────────▶ Failed      │
//!   │                  │ Set (cancel)                  │ Set     │ Set
//!   └──────────────────┴───────────────────────────────┴─────────┘
//! ```
//!
//! The session is driven by the control loop: [`TrainingSession::tick`] once
//! per tick while the Training view is active, and the two button handlers
//! when the dispatcher routes an event here.  Every transition reports a
//! [`SessionSignal`] which the loop turns into audio and statistics updates.

use serde::Serialize;

use crate::classifier::CognitiveReading;
use crate::config::SystemConfig;
use crate::params::Thresholds;

// ── Objective ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Objective {
    Attention,
    Relaxation,
    Flow,
}

impl Objective {
    /// Cycle Attention → Relaxation → Flow → Attention.
    pub fn next(self) -> Self {
        match self {
            Self::Attention => Self::Relaxation,
            Self::Relaxation => Self::Flow,
            Self::Flow => Self::Attention,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Attention => "Attention",
            Self::Relaxation => "Relaxation",
            Self::Flow => "Flow",
        }
    }

    /// Whether `reading` satisfies this objective.
    pub fn is_met(self, reading: &CognitiveReading, t: &Thresholds) -> bool {
        let att = reading.attention() >= t.attention_high();
        let rel = reading.relaxation() >= t.relaxation_high();
        match self {
            Self::Attention => att,
            Self::Relaxation => rel,
            Self::Flow => att && rel,
        }
    }
}

// ── Status and signals ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Completed,
    Failed,
}

impl SessionStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Outcome of a session transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionSignal {
    ObjectiveChanged(Objective),
    Started(Objective),
    Cancelled,
    /// A finished session was cleared back to `NotStarted`.
    Reset,
    LevelUp(u8),
    Completed { duration_secs: u32 },
    Failed { duration_secs: u32 },
}

// ── Rules ──────────────────────────────────────────────────────

/// Scoring and time-box constants for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRules {
    pub level_max: u8,
    pub points_per_level: u32,
    pub timeout_secs: u32,
}

impl Default for SessionRules {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

impl SessionRules {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            level_max: config.level_max,
            points_per_level: config.points_per_level,
            timeout_secs: config.session_timeout_secs,
        }
    }

    fn timeout_ms(&self) -> u32 {
        self.timeout_secs.saturating_mul(1000)
    }
}

// ── Session ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrainingSession {
    #[serde(skip)]
    rules: SessionRules,
    objective: Objective,
    status: SessionStatus,
    level: u8,
    score: u32,
    started_at_ms: u32,
    duration_secs: u32,
}

impl Default for TrainingSession {
    fn default() -> Self {
        Self::new(SessionRules::default())
    }
}

impl TrainingSession {
    pub fn new(rules: SessionRules) -> Self {
        Self {
            rules,
            objective: Objective::Attention,
            status: SessionStatus::NotStarted,
            level: 1,
            score: 0,
            started_at_ms: 0,
            duration_secs: 0,
        }
    }

    // -- Accessors --

    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn level_max(&self) -> u8 {
        self.rules.level_max
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Frozen duration of the last finished session (0 until one finishes).
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Live elapsed seconds while running, the frozen duration once
    /// finished, 0 before starting.
    pub fn elapsed_secs(&self, now_ms: u32) -> u32 {
        match self.status {
            SessionStatus::NotStarted => 0,
            SessionStatus::InProgress => now_ms.wrapping_sub(self.started_at_ms) / 1000,
            SessionStatus::Completed | SessionStatus::Failed => self.duration_secs,
        }
    }

    // -- Button handlers --

    /// Next while not started: select the following objective.
    /// Ignored in every other status.
    pub fn cycle_objective(&mut self) -> Option<SessionSignal> {
        if self.status != SessionStatus::NotStarted {
            return None;
        }
        self.objective = self.objective.next();
        Some(SessionSignal::ObjectiveChanged(self.objective))
    }

    /// Set: start, cancel, or clear a finished session.
    pub fn press_set(&mut self, now_ms: u32) -> SessionSignal {
        match self.status {
            SessionStatus::NotStarted => {
                self.status = SessionStatus::InProgress;
                self.level = 1;
                self.score = 0;
                self.started_at_ms = now_ms;
                self.duration_secs = 0;
                SessionSignal::Started(self.objective)
            }
            SessionStatus::InProgress => {
                self.clear();
                SessionSignal::Cancelled
            }
            SessionStatus::Completed | SessionStatus::Failed => {
                self.clear();
                SessionSignal::Reset
            }
        }
    }

    // -- Per-tick evaluation --

    /// Score the current reading and check the time box.
    ///
    /// A finishing transition outranks a level-up on the same tick.
    pub fn tick(
        &mut self,
        reading: &CognitiveReading,
        thresholds: &Thresholds,
        now_ms: u32,
    ) -> Option<SessionSignal> {
        if self.status != SessionStatus::InProgress {
            return None;
        }

        let mut signal = None;

        if self.objective.is_met(reading, thresholds) {
            self.score = self.score.saturating_add(1);
            if self.score % self.rules.points_per_level == 0 && self.level < self.rules.level_max {
                self.level += 1;
                if self.level == self.rules.level_max {
                    return Some(self.finish(SessionStatus::Completed, now_ms));
                }
                signal = Some(SessionSignal::LevelUp(self.level));
            }
        }

        if now_ms.wrapping_sub(self.started_at_ms) >= self.rules.timeout_ms() {
            let outcome = if self.level < self.rules.level_max {
                SessionStatus::Failed
            } else {
                SessionStatus::Completed
            };
            return Some(self.finish(outcome, now_ms));
        }

        signal
    }

    // -- Internal --

    fn finish(&mut self, outcome: SessionStatus, now_ms: u32) -> SessionSignal {
        debug_assert!(outcome.is_finished());
        self.status = outcome;
        self.duration_secs = now_ms.wrapping_sub(self.started_at_ms) / 1000;
        match outcome {
            SessionStatus::Failed => SessionSignal::Failed {
                duration_secs: self.duration_secs,
            },
            _ => SessionSignal::Completed {
                duration_secs: self.duration_secs,
            },
        }
    }

    fn clear(&mut self) {
        self.status = SessionStatus::NotStarted;
        self.level = 1;
        self.score = 0;
        self.duration_secs = 0;
    }
}
