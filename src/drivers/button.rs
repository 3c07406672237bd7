//! ISR-debounced three-button panel driver.
//!
//! ## Hardware
//!
//! Three active-low momentary switches (Next, Back, Set) with pull-ups.
//! Each GPIO fires on its falling edge; the ISR calls
//! [`button_isr_handler`], which filters the edge through the shared
//! [`Debouncer`] and pushes the accepted [`ButtonEvent`] onto the event
//! queue drained by the control loop.
//!
//! ## Debounce
//!
//! One timestamp is shared by all three buttons: an edge on any button is
//! accepted only if at least `window_ms` have passed since the last accepted
//! edge on *any* button.  A fast press of Next therefore also masks a Set
//! edge that follows within the window.
//!
//! | Call                        | Condition                         | Result          |
//! |-----------------------------|-----------------------------------|-----------------|
//! | `record_edge(src, now)`     | `now - last >= window` (wrapping) | `Some(event)`   |
//! | `record_edge(src, now)`     | otherwise                         | `None`          |

use core::sync::atomic::{AtomicU32, Ordering};

use embedded_hal::digital::InputPin;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::HardwareError;
use crate::events;
use crate::pins;

/// Default acceptance window between two button events.
pub const DEBOUNCE_MS: u32 = 200;

/// Physical button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Next,
    Back,
    Set,
}

impl Button {
    pub const ALL: [Button; 3] = [Self::Next, Self::Back, Self::Set];

    /// GPIO this button is wired to.
    pub fn gpio(self) -> u8 {
        match self {
            Self::Next => pins::BUTTON_NEXT_GPIO,
            Self::Back => pins::BUTTON_BACK_GPIO,
            Self::Set => pins::BUTTON_SET_GPIO,
        }
    }

    /// Reverse lookup used by GPIO interrupt dispatch.
    pub fn from_gpio(gpio: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.gpio() == gpio)
    }
}

/// Logical button event, emitted at most once per debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonEvent {
    Next,
    Back,
    Set,
}

impl From<Button> for ButtonEvent {
    fn from(b: Button) -> Self {
        match b {
            Button::Next => Self::Next,
            Button::Back => Self::Back,
            Button::Set => Self::Set,
        }
    }
}

// ── Debouncer ──────────────────────────────────────────────────

/// Lock-free edge filter with a single shared acceptance timestamp.
pub struct Debouncer {
    window_ms: AtomicU32,
    last_accepted_ms: AtomicU32,
}

impl Debouncer {
    /// The acceptance timestamp starts at 0, so edges within the first
    /// window after boot are suppressed.
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms: AtomicU32::new(window_ms),
            last_accepted_ms: AtomicU32::new(0),
        }
    }

    pub fn set_window(&self, window_ms: u32) {
        self.window_ms.store(window_ms, Ordering::Relaxed);
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms.load(Ordering::Relaxed)
    }

    /// Filter a raw falling edge.  Safe to call from interrupt context.
    ///
    /// Suppressed edges leave the timestamp untouched.  If two contexts race
    /// for the same window, the compare-exchange lets exactly one win.
    pub fn record_edge(&self, source: Button, now_ms: u32) -> Option<ButtonEvent> {
        let last = self.last_accepted_ms.load(Ordering::Acquire);
        if now_ms.wrapping_sub(last) < self.window_ms() {
            return None;
        }
        self.last_accepted_ms
            .compare_exchange(last, now_ms, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(source.into())
    }

    /// Forget the last accepted edge (timestamp back to 0).
    pub fn reset(&self) {
        self.last_accepted_ms.store(0, Ordering::Release);
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_MS)
    }
}

/// Debouncer shared by the three panel buttons.
pub static PANEL_DEBOUNCER: Debouncer = Debouncer::new(DEBOUNCE_MS);

/// ISR handler — register this on each button's GPIO falling edge.
///
/// Lock-free on the debounce path; the queue push takes a short critical
/// section.  A full queue drops the event (counted by the queue).
pub fn button_isr_handler(source: Button, now_ms: u32) {
    if let Some(event) = PANEL_DEBOUNCER.record_edge(source, now_ms) {
        events::push_event(event);
    }
}

// ── Level sampling ─────────────────────────────────────────────

/// The three button inputs, read as levels.
///
/// Used for chords (Set pressed while Next is held).  Inputs are
/// active-low: a held button reads low.
pub struct ButtonPins<N, B, S> {
    next: N,
    back: B,
    set: S,
}

impl<N, B, S> ButtonPins<N, B, S>
where
    N: InputPin,
    B: InputPin,
    S: InputPin,
{
    pub fn new(next: N, back: B, set: S) -> Self {
        Self { next, back, set }
    }

    /// Raw level read.  `Ok(true)` means held.
    pub fn read(&mut self, button: Button) -> Result<bool, HardwareError> {
        let held = match button {
            Button::Next => self.next.is_low().map_err(|e| log_pin_error(button, &e)),
            Button::Back => self.back.is_low().map_err(|e| log_pin_error(button, &e)),
            Button::Set => self.set.is_low().map_err(|e| log_pin_error(button, &e)),
        }?;
        Ok(held)
    }

    /// Whether `button` is held.  A read error counts as released.
    pub fn is_held(&mut self, button: Button) -> bool {
        self.read(button).unwrap_or(false)
    }
}

fn log_pin_error(button: Button, e: &impl core::fmt::Debug) -> HardwareError {
    warn!("BUTTON | {:?} (GPIO {}) read failed: {:?}", button, button.gpio(), e);
    HardwareError::PinRead
}
