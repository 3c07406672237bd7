//! NeuroSync trainer firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  Peripherals are reached only through the port traits in
//! [`app::ports`]; the host build wires them to the simulation board in
//! [`adapters::sim`].

#![deny(unused_must_use)]

pub mod app;
pub mod classifier;
pub mod config;
pub mod events;
pub mod fsm;
pub mod params;
pub mod stats;
pub mod training;

pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;
pub mod sensors;
