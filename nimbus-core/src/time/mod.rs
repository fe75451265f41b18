//! Wall-clock time
//!
//! All wall-clock values are *local* seconds since the Unix epoch: the UTC
//! time from the last time document plus its UTC offset. Monotonic time (for
//! debouncing, refresh intervals, and screen windows) is kept separately as
//! plain `u64` milliseconds.

mod date;
mod wall;

pub use date::{CivilDate, Weekday};
pub use wall::WallClock;

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
pub const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Local wall-clock instant, in seconds since the epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(self) -> u64 {
        self.0
    }

    pub const fn add_secs(self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Hour and minute of the day
    pub const fn time_of_day(self) -> TimeOfDay {
        let secs = self.0 % SECS_PER_DAY;
        TimeOfDay {
            hour: (secs / SECS_PER_HOUR) as u8,
            minute: ((secs % SECS_PER_HOUR) / SECS_PER_MINUTE) as u8,
        }
    }

    pub const fn second(self) -> u8 {
        (self.0 % SECS_PER_MINUTE) as u8
    }

    /// Minutes since the epoch; identifies one calendar minute
    pub const fn minute_stamp(self) -> u64 {
        self.0 / SECS_PER_MINUTE
    }

    pub const fn days_since_epoch(self) -> u64 {
        self.0 / SECS_PER_DAY
    }

    pub fn date(self) -> CivilDate {
        CivilDate::from_days(self.days_since_epoch())
    }
}

/// Hour and minute on a 24-hour clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Returns `None` for an hour above 23 or a minute above 59
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub const fn hour(self) -> u8 {
        self.hour
    }

    pub const fn minute(self) -> u8 {
        self.minute
    }

    pub const fn minutes_since_midnight(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Next hour, wrapping 23 to 0; the minute is kept
    pub const fn next_hour(self) -> Self {
        Self {
            hour: (self.hour + 1) % 24,
            minute: self.minute,
        }
    }

    /// Next minute, wrapping 59 to 0 without carrying into the hour
    pub const fn next_minute(self) -> Self {
        Self {
            hour: self.hour,
            minute: (self.minute + 1) % 60,
        }
    }
}
