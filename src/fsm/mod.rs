//! Mode navigator — function-pointer menu state machine.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  ModeTable                                                 │
//! │  ┌────────────┬───────────┬──────────┬──────────────────┐  │
//! │  │ Mode       │ on_enter  │ on_exit  │ on_update        │  │
//! │  ├────────────┼───────────┼──────────┼──────────────────┤  │
//! │  │ Monitoring │ fn(ctx)   │ —        │ fn(ctx)          │  │
//! │  │ ConfigView │ fn(ctx)   │ —        │ fn(ctx)          │  │
//! │  │ Training   │ fn(ctx)   │ fn(ctx)  │ fn(ctx)          │  │
//! │  │ History    │ fn(ctx)   │ —        │ fn(ctx)          │  │
//! │  └────────────┴───────────┴──────────┴──────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The menu is a ring of four modes.  `Next`/`Back` step around the ring;
//! `Set` layers an edit overlay on top of the current mode and walks it
//! through the four thresholds before closing it.  While the overlay is
//! open the ConfigView handler is the *active view* whatever the underlying
//! mode is.
//!
//! Each tick the navigator runs `on_update` for the active view.  Whenever
//! the active view changes (mode step, overlay open or close) it runs
//! `on_exit` for the old view and then `on_enter` for the new one.
//!
//! Who receives a button press is decided by [`route`], a single table
//! covering overlay edits, training interception and the statistics-reset
//! chord.

pub mod context;
pub mod modes;

use context::ModeContext;
use log::info;
use serde::Serialize;

use crate::drivers::button::ButtonEvent;
use crate::params::ParamId;
use crate::training::SessionStatus;

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// The four top-level modes, in menu order.
/// Must stay in sync with the table built in [`modes::build_mode_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Mode {
    Monitoring = 0,
    ConfigView = 1,
    Training = 2,
    History = 3,
}

impl Mode {
    /// Total number of modes — sizes the table array.
    pub const COUNT: usize = 4;

    /// Index back to mode, wrapping around the ring.
    pub fn from_index(idx: usize) -> Self {
        match idx % Self::COUNT {
            0 => Self::Monitoring,
            1 => Self::ConfigView,
            2 => Self::Training,
            _ => Self::History,
        }
    }

    pub fn next(self) -> Self {
        Self::from_index(self as usize + 1)
    }

    pub fn prev(self) -> Self {
        Self::from_index(self as usize + Self::COUNT - 1)
    }
}

// ---------------------------------------------------------------------------
// Menu state
// ---------------------------------------------------------------------------

/// The parameter-edit overlay.  Holding a `ParamId` makes an overlay
/// without a valid parameter unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditOverlay {
    pub param: ParamId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuState {
    pub mode: Mode,
    pub overlay: Option<EditOverlay>,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            mode: Mode::Monitoring,
            overlay: None,
        }
    }
}

impl MenuState {
    /// The view whose handler runs this tick.
    pub fn active_view(&self) -> Mode {
        if self.overlay.is_some() {
            Mode::ConfigView
        } else {
            self.mode
        }
    }

    /// Parameter shown by the ConfigView handler.
    pub fn edited_param(&self) -> ParamId {
        self.overlay.map_or(ParamId::AttentionLow, |o| o.param)
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type ModeActionFn = fn(&mut ModeContext);

/// Signature for the per-tick update handler.
pub type ModeUpdateFn = fn(&mut ModeContext);

// ---------------------------------------------------------------------------
// Mode descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single mode.
pub struct ModeDescriptor {
    pub id: Mode,
    pub name: &'static str,
    pub on_enter: Option<ModeActionFn>,
    pub on_exit: Option<ModeActionFn>,
    pub on_update: ModeUpdateFn,
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Owner of a debounced button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Menu navigation (mode ring and overlay open/advance/close).
    Navigate(ButtonEvent),
    /// Step the edited threshold up (`raise`) or down.
    EditParameter { param: ParamId, raise: bool },
    /// The training session handles it.
    Training(ButtonEvent),
    /// Clear the statistics (Set while Next is held, in History).
    StatisticsReset,
}

/// Decide who handles `event`.
///
/// | Menu state                   | Next            | Back            | Set              |
/// |------------------------------|-----------------|-----------------|------------------|
/// | overlay(p) open              | edit p up       | edit p down     | navigate         |
/// | Training, session not started| training        | navigate        | training         |
/// | Training, other status       | navigate        | navigate        | training         |
/// | History, Next held           | navigate        | navigate        | statistics reset |
/// | anything else                | navigate        | navigate        | navigate         |
pub fn route(
    menu: &MenuState,
    session: SessionStatus,
    event: ButtonEvent,
    next_held: bool,
) -> Route {
    if let Some(EditOverlay { param }) = menu.overlay {
        return match event {
            ButtonEvent::Next => Route::EditParameter { param, raise: true },
            ButtonEvent::Back => Route::EditParameter { param, raise: false },
            ButtonEvent::Set => Route::Navigate(event),
        };
    }

    match (menu.mode, event) {
        (Mode::Training, ButtonEvent::Set) => Route::Training(event),
        (Mode::Training, ButtonEvent::Next) if session == SessionStatus::NotStarted => {
            Route::Training(event)
        }
        (Mode::History, ButtonEvent::Set) if next_held => Route::StatisticsReset,
        _ => Route::Navigate(event),
    }
}

/// What a navigation event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavChange {
    ModeChanged { from: Mode, to: Mode },
    /// Overlay opened, advanced, or (with `None`) closed.
    OverlayChanged(Option<ParamId>),
}

// ---------------------------------------------------------------------------
// Navigator engine
// ---------------------------------------------------------------------------

/// The menu state machine.
///
/// Owns the mode table and the [`MenuState`]; mirrors the menu into
/// [`ModeContext::menu`] before every handler call.
pub struct Navigator {
    /// Fixed-size table indexed by `Mode as usize`.
    table: [ModeDescriptor; Mode::COUNT],
    menu: MenuState,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the active view was entered.
    view_entry_tick: u64,
}

impl Navigator {
    /// Construct a navigator starting in `initial` with no overlay.
    pub fn new(table: [ModeDescriptor; Mode::COUNT], initial: Mode) -> Self {
        Self {
            table,
            menu: MenuState {
                mode: initial,
                overlay: None,
            },
            tick_count: 0,
            view_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter`.  Call once before the first `tick()`.
    pub fn start(&mut self, ctx: &mut ModeContext) {
        let view = self.menu.active_view();
        info!("NAV | starting in {}", self.descriptor(view).name);
        ctx.menu = self.menu;
        if let Some(enter) = self.descriptor(view).on_enter {
            enter(ctx);
        }
    }

    /// Run the active view's `on_update`.
    pub fn tick(&mut self, ctx: &mut ModeContext) {
        self.tick_count += 1;
        ctx.ticks_in_view = self.tick_count - self.view_entry_tick;
        ctx.total_ticks = self.tick_count;
        ctx.menu = self.menu;

        let view = self.menu.active_view();
        (self.descriptor(view).on_update)(ctx);
    }

    /// Apply a navigation event.
    ///
    /// - `Next`/`Back` step the mode ring; ignored while the overlay is open.
    /// - `Set` opens the overlay on the first parameter, advances it, and
    ///   closes it after the last one.
    pub fn navigate(&mut self, event: ButtonEvent, ctx: &mut ModeContext) -> Option<NavChange> {
        let mut next = self.menu;
        let change = match (event, self.menu.overlay) {
            (ButtonEvent::Next | ButtonEvent::Back, Some(_)) => return None,
            (ButtonEvent::Next, None) => {
                next.mode = self.menu.mode.next();
                NavChange::ModeChanged {
                    from: self.menu.mode,
                    to: next.mode,
                }
            }
            (ButtonEvent::Back, None) => {
                next.mode = self.menu.mode.prev();
                NavChange::ModeChanged {
                    from: self.menu.mode,
                    to: next.mode,
                }
            }
            (ButtonEvent::Set, None) => {
                next.overlay = Some(EditOverlay {
                    param: ParamId::AttentionLow,
                });
                NavChange::OverlayChanged(Some(ParamId::AttentionLow))
            }
            (ButtonEvent::Set, Some(overlay)) => {
                next.overlay = overlay.param.next().map(|param| EditOverlay { param });
                NavChange::OverlayChanged(next.overlay.map(|o| o.param))
            }
        };
        self.apply(next, ctx);
        Some(change)
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    pub fn mode(&self) -> Mode {
        self.menu.mode
    }

    /// Ticks spent in the active view.
    pub fn ticks_in_current_view(&self) -> u64 {
        self.tick_count - self.view_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn descriptor(&self, mode: Mode) -> &ModeDescriptor {
        &self.table[mode as usize]
    }

    fn apply(&mut self, next: MenuState, ctx: &mut ModeContext) {
        let old_view = self.menu.active_view();
        let new_view = next.active_view();

        if next.mode != self.menu.mode {
            info!(
                "NAV | {} -> {}",
                self.descriptor(self.menu.mode).name,
                self.descriptor(next.mode).name
            );
        }
        if next.overlay != self.menu.overlay {
            match next.overlay {
                Some(o) => info!("NAV | editing {}", o.param.label()),
                None => info!("NAV | edit overlay closed"),
            }
        }

        if old_view != new_view {
            if let Some(exit) = self.descriptor(old_view).on_exit {
                exit(ctx);
            }
        }

        self.menu = next;
        ctx.menu = next;

        if old_view != new_view {
            self.view_entry_tick = self.tick_count;
            ctx.ticks_in_view = 0;
            if let Some(enter) = self.descriptor(new_view).on_enter {
                enter(ctx);
            }
        }
    }
}
