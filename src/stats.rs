//! Running statistics over monitoring and training samples.
//!
//! Accumulators are private; [`Statistics::record`],
//! [`Statistics::on_session_complete`] and [`Statistics::reset`] are the only
//! mutation paths.

use serde::Serialize;

use crate::classifier::CognitiveReading;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    sum_attention: f64,
    sum_relaxation: f64,
    max_attention: f32,
    max_relaxation: f32,
    sample_count: u32,
    session_start_ms: u32,
    last_session_duration_secs: u32,
    completed_sessions: u32,
}

impl Statistics {
    pub fn new(now_ms: u32) -> Self {
        Self {
            sum_attention: 0.0,
            sum_relaxation: 0.0,
            max_attention: 0.0,
            max_relaxation: 0.0,
            sample_count: 0,
            session_start_ms: now_ms,
            last_session_duration_secs: 0,
            completed_sessions: 0,
        }
    }

    /// Fold one reading into the sums and maxima.
    pub fn record(&mut self, reading: &CognitiveReading) {
        self.sample_count = self.sample_count.saturating_add(1);
        self.sum_attention += f64::from(reading.attention());
        self.sum_relaxation += f64::from(reading.relaxation());
        self.max_attention = self.max_attention.max(reading.attention());
        self.max_relaxation = self.max_relaxation.max(reading.relaxation());
    }

    /// A training session ended (completed or failed).
    pub fn on_session_complete(&mut self, duration_secs: u32) {
        self.completed_sessions = self.completed_sessions.saturating_add(1);
        self.last_session_duration_secs = duration_secs;
    }

    /// Zero every accumulator and restart the uptime clock.
    pub fn reset(&mut self, now_ms: u32) {
        *self = Self::new(now_ms);
    }

    pub fn mean_attention(&self) -> f32 {
        self.mean(self.sum_attention)
    }

    pub fn mean_relaxation(&self) -> f32 {
        self.mean(self.sum_relaxation)
    }

    fn mean(&self, sum: f64) -> f32 {
        if self.sample_count == 0 {
            0.0
        } else {
            (sum / f64::from(self.sample_count)) as f32
        }
    }

    pub fn max_attention(&self) -> f32 {
        self.max_attention
    }

    pub fn max_relaxation(&self) -> f32 {
        self.max_relaxation
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    pub fn last_session_duration_secs(&self) -> u32 {
        self.last_session_duration_secs
    }

    /// Whole seconds since construction or the last reset.
    pub fn uptime_secs(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.session_start_ms) / 1000
    }
}
