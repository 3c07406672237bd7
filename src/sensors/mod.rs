//! Sensor subsystem — the potentiometer pair standing in for the EEG and
//! GSR probes.
//!
//! Each 12-bit ADC reading is mapped linearly onto its scale and a small
//! uniform jitter is added to imitate natural signal fluctuation:
//!
//! | Channel    | Scale  | Jitter      |
//! |------------|--------|-------------|
//! | attention  | 0–100  | ±2.5        |
//! | relaxation | 0–10   | ±0.25       |
//!
//! The jitter source is any `rand::Rng`, so tests can seed it.

use log::warn;
use rand::Rng;

use crate::error::HardwareError;
use crate::params::{ATTENTION_MAX, RELAXATION_MAX};
use crate::pins::ADC_MAX;

pub const ATTENTION_JITTER: f32 = 2.5;
pub const RELAXATION_JITTER: f32 = 0.25;

/// One single-ended ADC input.
pub trait AdcChannel {
    /// Raw conversion, 0 to [`ADC_MAX`].
    fn read_raw(&mut self) -> Result<u16, HardwareError>;
}

/// Map a raw reading onto `0..=max`, add `noise`, and clamp.
pub fn scale_reading(raw: u16, max: f32, noise: f32) -> f32 {
    let raw = raw.min(ADC_MAX);
    (f32::from(raw) / f32::from(ADC_MAX) * max + noise).clamp(0.0, max)
}

pub fn attention_from_adc(raw: u16, noise: f32) -> f32 {
    scale_reading(raw, ATTENTION_MAX, noise)
}

pub fn relaxation_from_adc(raw: u16, noise: f32) -> f32 {
    scale_reading(raw, RELAXATION_MAX, noise)
}

/// Two potentiometers plus a jitter source.
pub struct PotentiometerSource<A, B, R> {
    attention: A,
    relaxation: B,
    rng: R,
    /// Last successful raw readings; reused when a conversion fails.
    last_raw: (u16, u16),
    failed_reads: u32,
}

impl<A, B, R> PotentiometerSource<A, B, R>
where
    A: AdcChannel,
    B: AdcChannel,
    R: Rng,
{
    pub fn new(attention: A, relaxation: B, rng: R) -> Self {
        Self {
            attention,
            relaxation,
            rng,
            last_raw: (0, 0),
            failed_reads: 0,
        }
    }

    /// Sample both channels.  Returns `(attention, relaxation)`.
    ///
    /// A failed conversion is logged and the previous good raw value is
    /// reused, so one flaky read never stalls the loop.
    pub fn read(&mut self) -> (f32, f32) {
        let att_raw = match self.attention.read_raw() {
            Ok(v) => v,
            Err(e) => {
                self.failed_reads += 1;
                warn!("SENSOR | attention ADC: {}", e);
                self.last_raw.0
            }
        };
        let rel_raw = match self.relaxation.read_raw() {
            Ok(v) => v,
            Err(e) => {
                self.failed_reads += 1;
                warn!("SENSOR | relaxation ADC: {}", e);
                self.last_raw.1
            }
        };
        self.last_raw = (att_raw, rel_raw);

        let att_noise = self.rng.gen_range(-ATTENTION_JITTER..=ATTENTION_JITTER);
        let rel_noise = self.rng.gen_range(-RELAXATION_JITTER..=RELAXATION_JITTER);
        (
            attention_from_adc(att_raw, att_noise),
            relaxation_from_adc(rel_raw, rel_noise),
        )
    }

    /// Total failed conversions since construction.
    pub fn failed_reads(&self) -> u32 {
        self.failed_reads
    }
}
