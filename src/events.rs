//! Interrupt-to-loop event queue.
//!
//! Debounced button events are produced in interrupt context and consumed
//! by the control loop, which drains the queue once at the start of each
//! tick.  Every multi-field update (overlay advance, session transition,
//! threshold step, statistics reset) therefore happens on the loop side.
//!
//! ```text
//! ┌─────────────┐  record_edge  ┌──────────────┐  drain  ┌──────────────┐
//! │ GPIO ISR    │──────────────▶│  Event Queue │────────▶│  Main Loop   │
//! │ (Next/Back/ │  ButtonEvent  │  (bounded)   │         │  (consumer)  │
//! │  Set edge)  │               │              │         │              │
//! └─────────────┘               └──────────────┘         └──────────────┘
//! ```
//!
//! The queue is an `embassy-sync` channel behind a critical-section raw
//! mutex, so pushing never blocks and never allocates.  A full queue drops
//! the event and bumps a counter the loop can report.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::drivers::button::ButtonEvent;

/// Maximum number of pending button events.
pub const EVENT_QUEUE_CAP: usize = 16;

/// Bounded, interrupt-safe FIFO of button events.
pub struct EventQueue<const N: usize> {
    channel: Channel<CriticalSectionRawMutex, ButtonEvent, N>,
    dropped: AtomicU32,
}

impl<const N: usize> EventQueue<N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push an event.  Safe to call from ISR context.
    /// Returns `false` if the queue is full (event dropped).
    pub fn push(&self, event: ButtonEvent) -> bool {
        if self.channel.try_send(event).is_ok() {
            true
        } else {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            false
        }
    }

    /// Pop the oldest pending event.
    pub fn pop(&self) -> Option<ButtonEvent> {
        self.channel.try_receive().ok()
    }

    /// Drain all pending events into a callback, in FIFO order.
    pub fn drain(&self, mut handler: impl FnMut(ButtonEvent)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Events dropped because the queue was full, since the last call.
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::Relaxed)
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Process-wide queue ─────────────────────────────────────────

/// The queue the button ISR feeds and the control loop drains.
pub static BUTTON_EVENTS: EventQueue<EVENT_QUEUE_CAP> = EventQueue::new();

/// Push onto [`BUTTON_EVENTS`].
pub fn push_event(event: ButtonEvent) -> bool {
    BUTTON_EVENTS.push(event)
}

/// Pop from [`BUTTON_EVENTS`].
pub fn pop_event() -> Option<ButtonEvent> {
    BUTTON_EVENTS.pop()
}

/// Number of events waiting in [`BUTTON_EVENTS`].
pub fn queue_len() -> usize {
    BUTTON_EVENTS.len()
}
