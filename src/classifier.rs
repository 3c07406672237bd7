//! Cognitive-state classification.
//!
//! A [`CognitiveReading`] is built once per tick from the two sensor scalars.
//! Inputs are clamped at construction and the four band powers are derived
//! deterministically, so a reading is immutable and always in range.
//! [`classify`] maps a reading onto one of six states with a fixed precedence.

use serde::Serialize;

use crate::params::{ATTENTION_MAX, RELAXATION_MAX, Thresholds};

/// One tick's worth of sensor data plus derived band powers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CognitiveReading {
    attention: f32,
    relaxation: f32,
    bands: BandPowers,
}

/// Illustrative EEG band powers derived from attention and relaxation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandPowers {
    pub alpha: f32,
    pub beta: f32,
    pub theta: f32,
    pub delta: f32,
}

impl BandPowers {
    fn derive(attention: f32, relaxation: f32) -> Self {
        let a = attention / ATTENTION_MAX;
        let r = relaxation / RELAXATION_MAX;
        Self {
            beta: (10.0 + a * 20.0).max(0.0),
            theta: (20.0 - a * 15.0).max(0.0),
            alpha: (5.0 + r * 10.0).max(0.0),
            delta: (20.0 - ((a + r) / 2.0) * 18.0).max(0.0),
        }
    }
}

impl CognitiveReading {
    /// Clamp both inputs into range and derive band powers.
    /// A NaN input is treated as the bottom of its scale.
    pub fn new(attention: f32, relaxation: f32) -> Self {
        let attention = clamp_or_zero(attention, ATTENTION_MAX);
        let relaxation = clamp_or_zero(relaxation, RELAXATION_MAX);
        Self {
            attention,
            relaxation,
            bands: BandPowers::derive(attention, relaxation),
        }
    }

    pub fn attention(&self) -> f32 {
        self.attention
    }

    pub fn relaxation(&self) -> f32 {
        self.relaxation
    }

    pub fn bands(&self) -> BandPowers {
        self.bands
    }
}

fn clamp_or_zero(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

// ── States ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CognitiveState {
    Distracted,
    Normal,
    Concentrated,
    DeepRelaxation,
    Flow,
    Anxious,
}

impl CognitiveState {
    /// Text shown on the monitoring display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Distracted => "Distracted",
            Self::Normal => "Normal",
            Self::Concentrated => "Concentrated",
            Self::DeepRelaxation => "Relaxed",
            Self::Flow => "Flow",
            Self::Anxious => "Anxious",
        }
    }
}

/// Classify a reading.  First matching rule wins:
///
/// 1. high attention and high relaxation → `Flow`
/// 2. high attention and low relaxation → `Anxious`
/// 3. high attention → `Concentrated`
/// 4. low attention → `Distracted`
/// 5. high relaxation → `DeepRelaxation`
/// 6. otherwise `Normal`
pub fn classify(reading: &CognitiveReading, t: &Thresholds) -> CognitiveState {
    let att = reading.attention();
    let rel = reading.relaxation();
    let high_att = att >= t.attention_high();

    if high_att && rel >= t.relaxation_high() {
        CognitiveState::Flow
    } else if high_att && rel < t.relaxation_low() {
        CognitiveState::Anxious
    } else if high_att {
        CognitiveState::Concentrated
    } else if att < t.attention_low() {
        CognitiveState::Distracted
    } else if rel >= t.relaxation_high() {
        CognitiveState::DeepRelaxation
    } else {
        CognitiveState::Normal
    }
}
