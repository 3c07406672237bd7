//! Host simulation board.
//!
//! Stands in for the panel when running on a development machine: the
//! potentiometers drift as a random walk, buttons are atomic flags set by
//! the console, and every output goes to the log.

use core::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::{self, InputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::hardware::{Board, PanelHardware};
use crate::config::SystemConfig;
use crate::drivers::button::{Button, ButtonPins};
use crate::drivers::buzzer::{ToneOutput, ToneSequencer};
use crate::drivers::display::{FrameText, TextDisplay};
use crate::drivers::led_matrix::{LedMatrix, PixelStrip, Strip};
use crate::drivers::status_led::RgbLed;
use crate::error::HardwareError;
use crate::pins::{ADC_MAX, PWM_WRAP};
use crate::sensors::{AdcChannel, PotentiometerSource};

/// Largest drift per conversion, in raw counts.
const WALK_STEP: i32 = 60;

// ── Inputs ─────────────────────────────────────────────────────

/// A potentiometer someone keeps nudging.
pub struct RandomWalkAdc {
    raw: u16,
    rng: StdRng,
}

impl RandomWalkAdc {
    pub fn new(start: u16, seed: u64) -> Self {
        Self {
            raw: start.min(ADC_MAX),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl AdcChannel for RandomWalkAdc {
    fn read_raw(&mut self) -> Result<u16, HardwareError> {
        let step = self.rng.gen_range(-WALK_STEP..=WALK_STEP);
        let next = (i32::from(self.raw) + step).clamp(0, i32::from(ADC_MAX));
        self.raw = next as u16;
        Ok(self.raw)
    }
}

/// Active-low button level backed by a shared flag (`true` = held).
#[derive(Clone, Default)]
pub struct SimPin(Arc<AtomicBool>);

impl SimPin {
    pub fn set_held(&self, held: bool) {
        self.0.store(held, Ordering::Release);
    }
}

impl digital::ErrorType for SimPin {
    type Error = Infallible;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.load(Ordering::Acquire))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.load(Ordering::Acquire))
    }
}

/// Handles the console thread uses to hold buttons down.
#[derive(Clone, Default)]
pub struct SimButtons {
    pub next: SimPin,
    pub back: SimPin,
    pub set: SimPin,
}

impl SimButtons {
    pub fn pin(&self, button: Button) -> &SimPin {
        match button {
            Button::Next => &self.next,
            Button::Back => &self.back,
            Button::Set => &self.set,
        }
    }
}

// ── Outputs ────────────────────────────────────────────────────

/// PWM channel that only remembers its duty.
#[derive(Default)]
pub struct SimPwm {
    duty: u16,
}

impl SimPwm {
    pub fn duty(&self) -> u16 {
        self.duty
    }
}

impl pwm::ErrorType for SimPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        PWM_WRAP
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.duty = duty;
        Ok(())
    }
}

/// Buzzer that logs each tone.
pub struct LogTone {
    name: &'static str,
    sounding: Option<u32>,
}

impl LogTone {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            sounding: None,
        }
    }

    /// Frequency currently sounding.
    pub fn sounding(&self) -> Option<u32> {
        self.sounding
    }
}

impl ToneOutput for LogTone {
    fn tone_on(&mut self, freq_hz: u32) -> Result<(), HardwareError> {
        debug!("BUZZER | {} {} Hz", self.name, freq_hz);
        self.sounding = Some(freq_hz);
        Ok(())
    }

    fn tone_off(&mut self) -> Result<(), HardwareError> {
        self.sounding = None;
        Ok(())
    }
}

/// Text panel that logs a frame whenever its content changes.
#[derive(Default)]
pub struct LogDisplay {
    last: Option<FrameText>,
}

impl LogDisplay {
    pub fn last(&self) -> Option<&FrameText> {
        self.last.as_ref()
    }
}

impl TextDisplay for LogDisplay {
    fn draw(&mut self, frame: &FrameText) -> Result<(), HardwareError> {
        if self.last.as_ref() != Some(frame) {
            info!("OLED | {}", frame);
            self.last = Some(frame.clone());
        }
        Ok(())
    }
}

/// Pixel strip that logs the lit count.
#[derive(Default)]
pub struct LogStrip;

impl PixelStrip for LogStrip {
    fn write(&mut self, pixels: &Strip) -> Result<(), HardwareError> {
        let lit = pixels.iter().filter(|p| **p != (0, 0, 0)).count();
        debug!("MATRIX | {} lit", lit);
        Ok(())
    }
}

// ── Board ──────────────────────────────────────────────────────

pub struct SimBoard;

impl Board for SimBoard {
    type AttentionAdc = RandomWalkAdc;
    type RelaxationAdc = RandomWalkAdc;
    type Jitter = StdRng;
    type Display = LogDisplay;
    type Strip = LogStrip;
    type Red = SimPwm;
    type Green = SimPwm;
    type Blue = SimPwm;
    type PrimaryTone = LogTone;
    type AlertTone = LogTone;
    type NextPin = SimPin;
    type BackPin = SimPin;
    type SetPin = SimPin;
}

/// Assemble the simulated panel.  Both potentiometers start at mid-scale;
/// `seed` fixes the drift and the jitter.
pub fn build_panel(
    config: &SystemConfig,
    buttons: &SimButtons,
    seed: u64,
) -> PanelHardware<SimBoard> {
    let mid = ADC_MAX / 2;
    PanelHardware::new(
        PotentiometerSource::new(
            RandomWalkAdc::new(mid, seed),
            RandomWalkAdc::new(mid, seed.wrapping_add(1)),
            StdRng::seed_from_u64(seed.wrapping_add(2)),
        ),
        LogDisplay::default(),
        LedMatrix::new(LogStrip, config.matrix_colour),
        RgbLed::new(SimPwm::default(), SimPwm::default(), SimPwm::default()),
        ToneSequencer::new(LogTone::new("primary")),
        ToneSequencer::new(LogTone::new("alert")),
        ButtonPins::new(
            buttons.next.clone(),
            buttons.back.clone(),
            buttons.set.clone(),
        ),
    )
}
