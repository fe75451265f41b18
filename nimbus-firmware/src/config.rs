//! Clock configuration
//!
//! `clock.toml` is checked by the build script, which emits
//! `clock_config()` with every field spelled out.

use defmt::*;
use nimbus_core::config::ClockConfig;
use nimbus_core::time::TimeOfDay;
use nimbus_protocol::documents::truncated;

include!(concat!(env!("OUT_DIR"), "/clock_config.rs"));

/// Load the compiled-in configuration
pub fn load() -> ClockConfig {
    let config = clock_config();
    info!(
        "Config: wake={}ms alarm={} ({}) location={}",
        config.wake_interval_ms,
        config.alarm_time,
        if config.alarm_enabled { "on" } else { "off" },
        config.location.as_str()
    );
    config
}
