//! Hardware adapter — bridges the panel peripherals to domain port traits.
//!
//! Owns the potentiometer source and every output driver, exposing them
//! through [`SensorPort`], [`DisplayPort`], [`PatternPort`], [`AudioPort`]
//! and [`InputPort`].  This is the only module in the system that touches
//! the drivers.  Which concrete peripherals sit underneath is chosen by a
//! [`Board`] (the host simulation in [`sim`](super::sim), or a real HAL).

use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::warn;
use rand::Rng;

use crate::app::ports::{AudioPort, DisplayPort, InputPort, PatternPort, SensorPort};
use crate::classifier::{CognitiveReading, CognitiveState};
use crate::drivers::button::{Button, ButtonPins};
use crate::drivers::buzzer::{BuzzerId, Melody, ToneOutput, ToneSequencer};
use crate::drivers::display::{self, FrameText, TextDisplay};
use crate::drivers::led_matrix::{Grid, LedMatrix, PixelStrip};
use crate::drivers::status_led::RgbLed;
use crate::params::{ParamId, Thresholds};
use crate::sensors::{AdcChannel, PotentiometerSource};
use crate::stats::Statistics;
use crate::training::TrainingSession;

/// The concrete peripheral types of one board.
pub trait Board {
    type AttentionAdc: AdcChannel;
    type RelaxationAdc: AdcChannel;
    type Jitter: Rng;
    type Display: TextDisplay;
    type Strip: PixelStrip;
    type Red: SetDutyCycle;
    type Green: SetDutyCycle;
    type Blue: SetDutyCycle;
    type PrimaryTone: ToneOutput;
    type AlertTone: ToneOutput;
    type NextPin: InputPin;
    type BackPin: InputPin;
    type SetPin: InputPin;
}

/// Concrete adapter that combines all panel hardware behind port traits.
pub struct PanelHardware<B: Board> {
    source: PotentiometerSource<B::AttentionAdc, B::RelaxationAdc, B::Jitter>,
    display: B::Display,
    matrix: LedMatrix<B::Strip>,
    indicator: RgbLed<B::Red, B::Green, B::Blue>,
    primary: ToneSequencer<B::PrimaryTone>,
    alert: ToneSequencer<B::AlertTone>,
    buttons: ButtonPins<B::NextPin, B::BackPin, B::SetPin>,
    /// Cues requested since the last `update`, started with its timestamp.
    pending_primary: Option<Melody>,
    pending_alert: Option<Melody>,
}

impl<B: Board> PanelHardware<B> {
    pub fn new(
        source: PotentiometerSource<B::AttentionAdc, B::RelaxationAdc, B::Jitter>,
        display: B::Display,
        matrix: LedMatrix<B::Strip>,
        indicator: RgbLed<B::Red, B::Green, B::Blue>,
        primary: ToneSequencer<B::PrimaryTone>,
        alert: ToneSequencer<B::AlertTone>,
        buttons: ButtonPins<B::NextPin, B::BackPin, B::SetPin>,
    ) -> Self {
        Self {
            source,
            display,
            matrix,
            indicator,
            primary,
            alert,
            buttons,
            pending_primary: None,
            pending_alert: None,
        }
    }

    pub fn display(&self) -> &B::Display {
        &self.display
    }

    pub fn matrix(&self) -> &LedMatrix<B::Strip> {
        &self.matrix
    }

    pub fn indicator(&self) -> &RgbLed<B::Red, B::Green, B::Blue> {
        &self.indicator
    }

    pub fn primary(&self) -> &ToneSequencer<B::PrimaryTone> {
        &self.primary
    }

    pub fn alert(&self) -> &ToneSequencer<B::AlertTone> {
        &self.alert
    }

    fn draw(&mut self, frame: &FrameText) {
        if let Err(e) = self.display.draw(frame) {
            warn!("DISPLAY | draw failed: {}", e);
        }
    }

    fn queue(&mut self, melody: Melody) {
        match melody.buzzer() {
            BuzzerId::Primary => self.pending_primary = Some(melody),
            BuzzerId::Alert => self.pending_alert = Some(melody),
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<B: Board> SensorPort for PanelHardware<B> {
    fn next_reading(&mut self) -> (f32, f32) {
        self.source.read()
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl<B: Board> DisplayPort for PanelHardware<B> {
    fn render_monitoring(&mut self, reading: &CognitiveReading, state: CognitiveState) {
        self.draw(&display::monitoring(reading, state));
    }

    fn render_config(&mut self, param: ParamId, thresholds: &Thresholds) {
        self.draw(&display::config(param, thresholds));
    }

    fn render_training(&mut self, session: &TrainingSession, elapsed_secs: u32) {
        self.draw(&display::training(session, elapsed_secs));
    }

    fn render_history(&mut self, stats: &Statistics, uptime_secs: u32) {
        self.draw(&display::history(stats, uptime_secs));
    }
}

// ── PatternPort implementation ────────────────────────────────

impl<B: Board> PatternPort for PanelHardware<B> {
    fn set_pattern(&mut self, pattern: &Grid) {
        self.matrix.show(pattern).ok();
    }

    fn set_indicator_color(&mut self, r: u8, g: u8, b: u8) {
        if self.indicator.current_colour() == (r, g, b) {
            return;
        }
        if let Err(e) = self.indicator.set_colour(r, g, b) {
            warn!("LED | set ({}, {}, {}) failed: {}", r, g, b, e);
        }
    }
}

// ── AudioPort implementation ──────────────────────────────────

impl<B: Board> AudioPort for PanelHardware<B> {
    fn play_success(&mut self) {
        self.queue(Melody::Success);
    }

    fn play_error(&mut self) {
        self.queue(Melody::Error);
    }

    fn play_beep(&mut self) {
        self.queue(Melody::Beep);
    }

    fn update(&mut self, now_ms: u32) {
        if let Some(melody) = self.pending_primary.take() {
            self.primary.play(melody, now_ms);
        }
        if let Some(melody) = self.pending_alert.take() {
            self.alert.play(melody, now_ms);
        }
        self.primary.update(now_ms);
        self.alert.update(now_ms);
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<B: Board> InputPort for PanelHardware<B> {
    fn is_held(&mut self, button: Button) -> bool {
        self.buttons.is_held(button)
    }
}
