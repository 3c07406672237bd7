//! Piezo buzzer melodies and a non-blocking tone sequencer.
//!
//! Two buzzers are fitted: the primary one plays the success melody, the
//! alert one plays errors and navigation beeps.  A [`ToneSequencer`] owns one
//! buzzer and advances its melody from the control loop via
//! [`ToneSequencer::update`], so playback never blocks a tick.
//!
//! ## Melodies
//!
//! | Melody  | Buzzer  | Notes (Hz / ms on / ms gap)                |
//! |---------|---------|--------------------------------------------|
//! | Success | primary | 523/200/20 · 659/200/20 · 784/400/0        |
//! | Error   | alert   | 440/200/50 · 349/400/0                     |
//! | Beep    | alert   | 392/100/0                                  |

use log::warn;

use crate::error::HardwareError;

/// One step of a melody.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub freq_hz: u32,
    pub duration_ms: u32,
    /// Silence after the note before the next one starts.
    pub gap_ms: u32,
}

impl Note {
    const fn new(freq_hz: u32, duration_ms: u32, gap_ms: u32) -> Self {
        Self {
            freq_hz,
            duration_ms,
            gap_ms,
        }
    }
}

const SUCCESS: [Note; 3] = [
    Note::new(523, 200, 20), // C5
    Note::new(659, 200, 20), // E5
    Note::new(784, 400, 0),  // G5
];

const ERROR: [Note; 2] = [
    Note::new(440, 200, 50), // A4
    Note::new(349, 400, 0),  // F4
];

const BEEP: [Note; 1] = [Note::new(392, 100, 0)]; // G4

/// Which buzzer a melody belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerId {
    Primary,
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Melody {
    Success,
    Error,
    Beep,
}

impl Melody {
    pub fn notes(self) -> &'static [Note] {
        match self {
            Self::Success => &SUCCESS,
            Self::Error => &ERROR,
            Self::Beep => &BEEP,
        }
    }

    pub fn buzzer(self) -> BuzzerId {
        match self {
            Self::Success => BuzzerId::Primary,
            Self::Error | Self::Beep => BuzzerId::Alert,
        }
    }

    /// Total playing time including gaps.
    pub fn length_ms(self) -> u32 {
        self.notes().iter().map(|n| n.duration_ms + n.gap_ms).sum()
    }
}

/// A square-wave tone generator (PWM at 50 % duty on the board).
pub trait ToneOutput {
    fn tone_on(&mut self, freq_hz: u32) -> Result<(), HardwareError>;
    fn tone_off(&mut self) -> Result<(), HardwareError>;
}

// ── Sequencer ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Sounding,
    Gap,
}

#[derive(Debug, Clone, Copy)]
struct Playback {
    melody: Melody,
    step: usize,
    phase: Phase,
    phase_started_ms: u32,
}

/// Plays one melody at a time on one buzzer.
pub struct ToneSequencer<T> {
    output: T,
    playing: Option<Playback>,
}

impl<T: ToneOutput> ToneSequencer<T> {
    pub fn new(output: T) -> Self {
        Self {
            output,
            playing: None,
        }
    }

    /// Start `melody` now, replacing whatever was playing.
    pub fn play(&mut self, melody: Melody, now_ms: u32) {
        self.playing = None;
        self.start_step(melody, 0, now_ms);
    }

    /// Advance the melody.  Call once per control tick.
    pub fn update(&mut self, now_ms: u32) {
        let Some(mut pb) = self.playing else {
            return;
        };
        let notes = pb.melody.notes();

        // A long tick may cover several phases; catch up in one call.
        loop {
            let note = notes[pb.step];
            let phase_len = match pb.phase {
                Phase::Sounding => note.duration_ms,
                Phase::Gap => note.gap_ms,
            };
            let elapsed = now_ms.wrapping_sub(pb.phase_started_ms);
            if elapsed < phase_len {
                self.playing = Some(pb);
                return;
            }
            let boundary = pb.phase_started_ms.wrapping_add(phase_len);

            match pb.phase {
                Phase::Sounding => {
                    self.silence();
                    if note.gap_ms > 0 && pb.step + 1 < notes.len() {
                        pb.phase = Phase::Gap;
                        pb.phase_started_ms = boundary;
                        continue;
                    }
                }
                Phase::Gap => {}
            }

            if pb.step + 1 < notes.len() {
                self.start_step(pb.melody, pb.step + 1, boundary);
                match self.playing {
                    Some(next) => pb = next,
                    None => return,
                }
            } else {
                self.playing = None;
                return;
            }
        }
    }

    /// Stop immediately.
    pub fn stop(&mut self) {
        if self.playing.take().is_some() {
            self.silence();
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.is_some()
    }

    /// The melody in progress, if any.
    pub fn current(&self) -> Option<Melody> {
        self.playing.map(|pb| pb.melody)
    }

    pub fn output(&self) -> &T {
        &self.output
    }

    fn start_step(&mut self, melody: Melody, step: usize, at_ms: u32) {
        let note = melody.notes()[step];
        if let Err(e) = self.output.tone_on(note.freq_hz) {
            warn!("BUZZER | tone {} Hz failed: {}", note.freq_hz, e);
            self.playing = None;
            return;
        }
        self.playing = Some(Playback {
            melody,
            step,
            phase: Phase::Sounding,
            phase_started_ms: at_ms,
        });
    }

    fn silence(&mut self) {
        if let Err(e) = self.output.tone_off() {
            warn!("BUZZER | tone off failed: {}", e);
        }
    }
}
