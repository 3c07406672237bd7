//! NeuroSync Firmware — Main Entry Point
//!
//! Hexagonal architecture with an interrupt-fed button queue and a fixed
//! cadence control loop.  On the host the panel is the simulation board
//! and the console stands in for the buttons.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  PanelHardware<SimBoard>  LogEventSink  JsonConfigFile  Clock  │
//! │  (Sensor+Display+Pattern  (EventSink)   (ConfigPort)           │
//! │   +Audio+Input)                                                │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Navigator · Training · Statistics                     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Console thread ──button_isr_handler──▶ BUTTON_EVENTS queue    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use neurosync::adapters::config_file::{CONFIG_ENV, JsonConfigFile};
use neurosync::adapters::log_sink::LogEventSink;
use neurosync::adapters::sim::{self, SimButtons};
use neurosync::adapters::time::MonotonicClock;
use neurosync::app::ports::ConfigPort;
use neurosync::app::service::AppService;
use neurosync::config::SystemConfig;
use neurosync::drivers::button::{Button, PANEL_DEBOUNCER, button_isr_handler};
use neurosync::error::ConfigError;
use neurosync::events::BUTTON_EVENTS;

// ── Console buttons ───────────────────────────────────────────
//
// Each line is one key: n/b/s press Next/Back/Set, r presses Set while
// Next is held (the statistics reset chord), q quits.

fn spawn_console(
    clock: MonotonicClock,
    buttons: SimButtons,
    hold_ms: u64,
    quit: Arc<AtomicBool>,
) -> Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("console".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match line.trim() {
                    "n" => button_isr_handler(Button::Next, clock.now_ms()),
                    "b" => button_isr_handler(Button::Back, clock.now_ms()),
                    "s" => button_isr_handler(Button::Set, clock.now_ms()),
                    "r" => {
                        // Held until the loop has drained the Set edge.
                        buttons.next.set_held(true);
                        button_isr_handler(Button::Set, clock.now_ms());
                        thread::sleep(Duration::from_millis(hold_ms));
                        buttons.next.set_held(false);
                    }
                    "q" => break,
                    "" => {}
                    other => warn!("CONSOLE | unknown key {:?} (n/b/s/r/q)", other),
                }
            }
            quit.store(true, Ordering::Release);
        })
        .context("spawning console thread")
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  NeuroSync v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let clock = MonotonicClock::new();

    // ── 2. Load config (or defaults) ──────────────────────────
    let config_port = JsonConfigFile::from_env();
    let config = match config_port.load() {
        Ok(cfg) => cfg,
        Err(ConfigError::NotFound) => {
            info!("No config file (set {}), using defaults", CONFIG_ENV);
            SystemConfig::default()
        }
        Err(e) => {
            warn!("Config load failed ({}), using defaults", e);
            SystemConfig::default()
        }
    };
    let tick = Duration::from_millis(u64::from(config.tick_interval_ms));

    // ── 3. Construct adapters ─────────────────────────────────
    let buttons = SimButtons::default();
    let seed = u64::from(clock.now_ms()) ^ u64::from(std::process::id());
    let mut hw = sim::build_panel(&config, &buttons, seed);
    let mut log_sink = LogEventSink::new();

    // ── 4. Button source ──────────────────────────────────────
    PANEL_DEBOUNCER.set_window(config.debounce_window_ms);
    let quit = Arc::new(AtomicBool::new(false));
    let console = spawn_console(
        clock,
        buttons,
        3 * u64::from(config.tick_interval_ms),
        Arc::clone(&quit),
    )?;
    info!("Keys: n=Next b=Back s=Set r=reset stats (in History) q=quit");

    // ── 5. Application service ────────────────────────────────
    let mut app = AppService::new(config, clock.now_ms());
    app.start(&mut log_sink);

    // ── 6. Control loop ───────────────────────────────────────
    while !quit.load(Ordering::Acquire) {
        app.tick(&BUTTON_EVENTS, &mut hw, &mut log_sink, clock.now_ms());
        thread::sleep(tick);
    }

    info!(
        "Shutting down after {} ticks ({} samples, {} sessions)",
        app.tick_count(),
        app.stats().sample_count(),
        app.stats().completed_sessions()
    );
    console
        .join()
        .map_err(|_| anyhow::anyhow!("console thread panicked"))?;
    Ok(())
}
