//! Board-agnostic core logic for the Nimbus desk clock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Button press classification (debounce, short vs. long)
//! - Screen state machine with the news auto-return window
//! - Alarm engine (toggle, snooze, mute, once-per-minute trigger)
//! - Periodic refresh scheduling for time, weather, and news
//! - The controller and the main tick loop that ties them together
//! - Collaborator traits for the display, sensor, network, and text input
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod alarm;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod time;
pub mod traits;

pub use nimbus_protocol::{Headline, Location, TimeDocument, WeatherSummary};
