//! Parameter store — the four adjustable classification thresholds.
//!
//! | Parameter        | Step | Lower clamp                | Upper clamp                 |
//! |------------------|------|----------------------------|-----------------------------|
//! | attention low    | 5.0  | 5.0                        | attention high − 5.0        |
//! | attention high   | 5.0  | attention low + 5.0        | 100.0                       |
//! | relaxation low   | 0.5  | 0.5                        | relaxation high − 0.5       |
//! | relaxation high  | 0.5  | relaxation low + 0.5       | 10.0                        |
//!
//! Adjustments never fail.  A request that would leave the band clamps to
//! the nearest legal value, so `low < high` (with the minimum gap) holds
//! after every call.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Minimum distance between the attention thresholds (percent).
pub const ATTENTION_GAP: f32 = 5.0;
/// Minimum distance between the relaxation thresholds.
pub const RELAXATION_GAP: f32 = 0.5;
/// Absolute attention scale maximum.
pub const ATTENTION_MAX: f32 = 100.0;
/// Absolute relaxation scale maximum.
pub const RELAXATION_MAX: f32 = 10.0;

/// Label shown for a parameter index that does not name a threshold.
pub const UNKNOWN_PARAMETER: &str = "Unknown parameter";

// ---------------------------------------------------------------------------
// Parameter identity
// ---------------------------------------------------------------------------

/// One of the four editable thresholds, in edit-overlay order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ParamId {
    AttentionLow = 0,
    AttentionHigh = 1,
    RelaxationLow = 2,
    RelaxationHigh = 3,
}

impl ParamId {
    pub const COUNT: usize = 4;

    /// All parameters in overlay order.
    pub const ALL: [ParamId; Self::COUNT] = [
        Self::AttentionLow,
        Self::AttentionHigh,
        Self::RelaxationLow,
        Self::RelaxationHigh,
    ];

    /// Map a raw index back to a parameter.  Indices past the last
    /// parameter name nothing.
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The parameter after this one, or `None` after the last (the edit
    /// overlay closes at that point).
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AttentionLow => "Attention low",
            Self::AttentionHigh => "Attention high",
            Self::RelaxationLow => "Relaxation low",
            Self::RelaxationHigh => "Relaxation high",
        }
    }

    /// Label for a raw index, falling back to [`UNKNOWN_PARAMETER`].
    pub fn label_for_index(idx: usize) -> &'static str {
        Self::from_index(idx).map_or(UNKNOWN_PARAMETER, Self::label)
    }

    /// True for the two attention thresholds.
    pub fn is_attention(self) -> bool {
        matches!(self, Self::AttentionLow | Self::AttentionHigh)
    }

    fn step(self) -> f32 {
        if self.is_attention() {
            ATTENTION_GAP
        } else {
            RELAXATION_GAP
        }
    }

    /// Full scale of the parameter's axis.
    pub fn range(self) -> f32 {
        if self.is_attention() {
            ATTENTION_MAX
        } else {
            RELAXATION_MAX
        }
    }
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// The four classification thresholds.
///
/// Fields are private: the only mutation path is [`ParameterStore`], which
/// keeps the ordering invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    attention_low: f32,
    attention_high: f32,
    relaxation_low: f32,
    relaxation_high: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            attention_low: 30.0,
            attention_high: 70.0,
            relaxation_low: 3.0,
            relaxation_high: 7.0,
        }
    }
}

impl Thresholds {
    /// Build a threshold set, rejecting any that violates the band invariant.
    pub fn new(
        attention_low: f32,
        attention_high: f32,
        relaxation_low: f32,
        relaxation_high: f32,
    ) -> Result<Self, ConfigError> {
        let t = Self {
            attention_low,
            attention_high,
            relaxation_low,
            relaxation_high,
        };
        t.validate()?;
        Ok(t)
    }

    /// Check bounds and minimum gaps.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.attention_low >= ATTENTION_GAP) {
            return Err(ConfigError::ValidationFailed("attention_low below 5.0"));
        }
        if !(self.attention_high <= ATTENTION_MAX) {
            return Err(ConfigError::ValidationFailed("attention_high above 100.0"));
        }
        if !(self.attention_high - self.attention_low >= ATTENTION_GAP) {
            return Err(ConfigError::ValidationFailed(
                "attention thresholds closer than 5.0",
            ));
        }
        if !(self.relaxation_low >= RELAXATION_GAP) {
            return Err(ConfigError::ValidationFailed("relaxation_low below 0.5"));
        }
        if !(self.relaxation_high <= RELAXATION_MAX) {
            return Err(ConfigError::ValidationFailed("relaxation_high above 10.0"));
        }
        if !(self.relaxation_high - self.relaxation_low >= RELAXATION_GAP) {
            return Err(ConfigError::ValidationFailed(
                "relaxation thresholds closer than 0.5",
            ));
        }
        Ok(())
    }

    pub fn attention_low(&self) -> f32 {
        self.attention_low
    }

    pub fn attention_high(&self) -> f32 {
        self.attention_high
    }

    pub fn relaxation_low(&self) -> f32 {
        self.relaxation_low
    }

    pub fn relaxation_high(&self) -> f32 {
        self.relaxation_high
    }

    pub fn get(&self, param: ParamId) -> f32 {
        match param {
            ParamId::AttentionLow => self.attention_low,
            ParamId::AttentionHigh => self.attention_high,
            ParamId::RelaxationLow => self.relaxation_low,
            ParamId::RelaxationHigh => self.relaxation_high,
        }
    }
}

// ---------------------------------------------------------------------------
// Parameter store
// ---------------------------------------------------------------------------

/// Owner of the live thresholds.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    thresholds: Thresholds,
}

impl ParameterStore {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Copy of the current thresholds.
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn get(&self, param: ParamId) -> f32 {
        self.thresholds.get(param)
    }

    /// Value as a fraction of the parameter's full scale (0.0–1.0).
    pub fn fraction(&self, param: ParamId) -> f32 {
        self.get(param) / param.range()
    }

    /// Step `param` up by one increment.  Returns the new value.
    pub fn increase(&mut self, param: ParamId) -> f32 {
        let value = self.get(param) + param.step();
        self.set_clamped(param, value)
    }

    /// Step `param` down by one increment.  Returns the new value.
    pub fn decrease(&mut self, param: ParamId) -> f32 {
        let value = self.get(param) - param.step();
        self.set_clamped(param, value)
    }

    fn set_clamped(&mut self, param: ParamId, value: f32) -> f32 {
        let t = &mut self.thresholds;
        // `max` then `min`: the upper bound wins if the band ever collapses.
        let clamped = match param {
            ParamId::AttentionLow => {
                t.attention_low = value
                    .max(ATTENTION_GAP)
                    .min(t.attention_high - ATTENTION_GAP);
                t.attention_low
            }
            ParamId::AttentionHigh => {
                t.attention_high = value
                    .max(t.attention_low + ATTENTION_GAP)
                    .min(ATTENTION_MAX);
                t.attention_high
            }
            ParamId::RelaxationLow => {
                t.relaxation_low = value
                    .max(RELAXATION_GAP)
                    .min(t.relaxation_high - RELAXATION_GAP);
                t.relaxation_low
            }
            ParamId::RelaxationHigh => {
                t.relaxation_high = value
                    .max(t.relaxation_low + RELAXATION_GAP)
                    .min(RELAXATION_MAX);
                t.relaxation_high
            }
        };
        debug_assert!(self.thresholds.validate().is_ok());
        clamped
    }
}
