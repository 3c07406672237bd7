//! System configuration parameters
//!
//! All tunable parameters for the NeuroSync trainer.
//! Loaded once at start through a [`ConfigPort`](crate::app::ports::ConfigPort);
//! edits made on the device afterwards live in memory only.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::Thresholds;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Timing ---
    /// Control loop period (milliseconds)
    pub tick_interval_ms: u32,
    /// Minimum time between two accepted button events (milliseconds)
    pub debounce_window_ms: u32,

    // --- Training ---
    /// Session time box (seconds)
    pub session_timeout_secs: u32,
    /// Objective-met ticks per level
    pub points_per_level: u32,
    /// Level at which a session completes
    pub level_max: u8,

    // --- Classification ---
    /// Initial thresholds seeding the parameter store
    pub thresholds: Thresholds,

    // --- Output ---
    /// Colour of lit pixels on the 5×5 matrix (r, g, b)
    pub matrix_colour: (u8, u8, u8),
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_interval_ms: 50, // 20 Hz
            debounce_window_ms: 200,

            // Training
            session_timeout_secs: 300, // 5 min
            points_per_level: 50,
            level_max: 10,

            // Classification
            thresholds: Thresholds::default(),

            // Output
            matrix_colour: (20, 20, 50),
        }
    }
}

impl SystemConfig {
    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_interval_ms must be > 0"));
        }
        if self.debounce_window_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "debounce_window_ms must be > 0",
            ));
        }
        if self.session_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "session_timeout_secs must be > 0",
            ));
        }
        if self.points_per_level == 0 {
            return Err(ConfigError::ValidationFailed("points_per_level must be > 0"));
        }
        if self.level_max < 2 {
            return Err(ConfigError::ValidationFailed("level_max must be >= 2"));
        }
        self.thresholds.validate()
    }
}
