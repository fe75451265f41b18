//! Clock configuration
//!
//! Defaults match the shipped device. The firmware overrides them from
//! `clock.toml` at build time and validates the result on boot.

use heapless::String;
use nimbus_protocol::Location;

use crate::input::Thresholds;
use crate::time::TimeOfDay;

/// Main loop wake interval
pub const WAKE_INTERVAL_MS: u64 = 5_000;

/// Presses shorter than this are contact bounce
pub const DEBOUNCE_FLOOR_MS: u64 = 50;

/// Presses at least this long rotate the screen
pub const LONG_PRESS_MS: u64 = 500;

/// An open press older than this lost its release edge
pub const STALE_PRESS_MS: u64 = 10_000;

/// How long the news screen stays up before returning to the clock
pub const NEWS_DISPLAY_MS: u64 = 30_000;

/// Time-of-day refresh cadence
pub const TIME_REFRESH_MS: u64 = 60_000;

/// News refresh cadence while the news screen is shown
pub const NEWS_REFRESH_MS: u64 = 15 * 60_000;

/// Weather refresh cadence while the weather screen is shown
pub const WEATHER_REFRESH_MS: u64 = 15 * 60_000;

/// Upper bound on a single network lookup
pub const FETCH_TIMEOUT_MS: u64 = 4_000;

pub const SNOOZE_SECS: u32 = 5 * 60;

/// A ringing episode nobody handles ends on its own after this long
pub const RING_LIMIT_SECS: u32 = 10 * 60;

pub const DEFAULT_LOCATION: &str = "Oslo";

pub const NEWS_SOURCE: &str = "CNN";

/// Configuration errors found by [`ClockConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// An interval or duration is zero
    ZeroInterval,
    /// The debounce floor must be below the long-press threshold
    DebounceNotBelowLongPress,
    /// A fetch must finish within one wake interval
    FetchTimeoutTooLong,
    /// The snooze must be shorter than the ring limit
    SnoozeExceedsRingLimit,
    EmptyLocation,
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockConfig {
    pub wake_interval_ms: u64,
    pub debounce_ms: u64,
    pub long_press_ms: u64,
    pub news_display_ms: u64,
    pub time_refresh_ms: u64,
    pub news_refresh_ms: u64,
    pub weather_refresh_ms: u64,
    pub fetch_timeout_ms: u64,
    pub snooze_secs: u32,
    pub ring_limit_secs: u32,
    /// Alarm target at power-on
    pub alarm_time: TimeOfDay,
    pub alarm_enabled: bool,
    /// Weather location at power-on
    pub location: Location,
    /// Label shown above headlines
    pub news_source: String<12>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            wake_interval_ms: WAKE_INTERVAL_MS,
            debounce_ms: DEBOUNCE_FLOOR_MS,
            long_press_ms: LONG_PRESS_MS,
            news_display_ms: NEWS_DISPLAY_MS,
            time_refresh_ms: TIME_REFRESH_MS,
            news_refresh_ms: NEWS_REFRESH_MS,
            weather_refresh_ms: WEATHER_REFRESH_MS,
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            snooze_secs: SNOOZE_SECS,
            ring_limit_secs: RING_LIMIT_SECS,
            alarm_time: TimeOfDay::new(7, 0).unwrap_or(TimeOfDay::MIDNIGHT),
            alarm_enabled: false,
            location: nimbus_protocol::documents::truncated(DEFAULT_LOCATION),
            news_source: nimbus_protocol::documents::truncated(NEWS_SOURCE),
        }
    }
}

impl ClockConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            self.wake_interval_ms,
            self.news_display_ms,
            self.time_refresh_ms,
            self.news_refresh_ms,
            self.weather_refresh_ms,
            self.fetch_timeout_ms,
            u64::from(self.snooze_secs),
            u64::from(self.ring_limit_secs),
        ];
        if intervals.contains(&0) {
            return Err(ConfigError::ZeroInterval);
        }
        if self.debounce_ms >= self.long_press_ms {
            return Err(ConfigError::DebounceNotBelowLongPress);
        }
        if self.fetch_timeout_ms >= self.wake_interval_ms {
            return Err(ConfigError::FetchTimeoutTooLong);
        }
        if self.snooze_secs >= self.ring_limit_secs {
            return Err(ConfigError::SnoozeExceedsRingLimit);
        }
        if self.location.trim().is_empty() {
            return Err(ConfigError::EmptyLocation);
        }
        Ok(())
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            debounce_ms: self.debounce_ms,
            long_press_ms: self.long_press_ms,
        }
    }
}
