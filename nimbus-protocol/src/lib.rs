//! Nimbus modem link protocol
//!
//! The clock controller does not speak HTTP or JSON itself. A network
//! co-processor (an ESP32 running the Wi-Fi stack) performs the web requests
//! and hands back compact documents over UART. This crate defines that link.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ SEQ │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 1B  │ 0–240B      │ 1B       │
//! └───────┴────────┴──────┴─────┴─────────────┴──────────┘
//! ```
//!
//! Every reply echoes the sequence number of the request it answers, so the
//! controller can drop replies that arrive after it gave up waiting.
//! Document payloads (time, weather, headlines) are postcard-encoded.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod documents;
pub mod frame;
pub mod messages;

pub use documents::{
    Headline, Location, TimeDocument, WeatherSummary, HEADLINE_LEN, LOCATION_LEN,
};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{FailureReason, Reply, Request};
