//! Per-screen renderers
//!
//! Each renderer gets only the slice of state its screen shows.

use core::fmt;

use nimbus_protocol::{Headline, WeatherSummary};

use super::frame::{TextFrame, DISPLAY_COLS};
use crate::alarm::{AlarmEngine, AlarmStatus};
use crate::time::Timestamp;
use crate::traits::{ClimateReading, SensorError};

/// Characters the headline window moves per tick
const SCROLL_STEP: usize = 8;

/// Fixed-point value in tenths, printed as `-1.5`
struct Tenths(i32);

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}

/// Clock screen: date and time, then the alarm status
pub fn render_clock(frame: &mut TextFrame, now: Option<Timestamp>, alarm: &AlarmEngine) {
    match now {
        Some(now) => {
            let tod = now.time_of_day();
            let date = now.date();
            frame.line_fmt(
                0,
                format_args!(
                    "{:02}:{:02} {} {:>2} {}",
                    tod.hour(),
                    tod.minute(),
                    date.weekday.abbrev(),
                    date.day,
                    date.month_abbrev()
                ),
            );
        }
        None => frame.set_line(0, "--:-- syncing"),
    }

    let target = alarm.target();
    let (label, shown) = match alarm.status() {
        AlarmStatus::Off => ("Alarm off", target),
        AlarmStatus::Armed => ("Alarm on", target),
        AlarmStatus::Ringing => ("WAKE UP!", target),
        AlarmStatus::Muted => ("Muted", target),
        AlarmStatus::Snoozed(until) => ("Snooze til", until.time_of_day()),
    };
    frame.line_fmt(
        1,
        format_args!("{:<11}{:02}:{:02}", label, shown.hour(), shown.minute()),
    );
}

/// Temperature/humidity screen
pub fn render_climate(frame: &mut TextFrame, reading: Option<Result<ClimateReading, SensorError>>) {
    match reading {
        Some(Ok(r)) => {
            frame.line_fmt(0, format_args!("Temp  {} C", Tenths(r.temp_c_x10.into())));
            frame.line_fmt(1, format_args!("Humid {} %", Tenths(r.humidity_x10.into())));
        }
        Some(Err(_)) => {
            frame.set_line(0, "Temp/Humidity");
            frame.set_line(1, "No sensor data");
        }
        None => {
            frame.set_line(0, "Temp/Humidity");
            frame.set_line(1, "Reading...");
        }
    }
}

/// What the weather screen needs to know
#[derive(Debug, Clone, Copy)]
pub struct WeatherView<'a> {
    pub summary: Option<&'a WeatherSummary>,
    /// Location currently configured
    pub location: &'a str,
    pub fetching: bool,
    /// The last lookup for this location failed
    pub failed: bool,
}

pub fn render_weather(frame: &mut TextFrame, view: WeatherView<'_>) {
    match view.summary {
        Some(w) => {
            frame.set_line(0, &w.location);
            frame.line_fmt(
                1,
                format_args!("{}C {}", Tenths(w.temp_c_x10.into()), w.condition),
            );
        }
        None => {
            frame.set_line(0, view.location);
            let status = if view.fetching {
                "Fetching..."
            } else if view.failed {
                "Unavailable"
            } else {
                "No data"
            };
            frame.set_line(1, status);
        }
    }
}

/// Outcome of the last location entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputPrompt {
    /// Waiting for the user to type a location
    #[default]
    Waiting,
    Accepted,
    /// The typed text is not a valid location
    Rejected,
    /// The weather service did not recognize the location
    Unknown,
}

/// Location entry screen
pub fn render_location(frame: &mut TextFrame, prompt: InputPrompt, location: &str) {
    match prompt {
        InputPrompt::Waiting => {
            frame.set_line(0, "Type location:");
            frame.set_line(1, location);
        }
        InputPrompt::Accepted => {
            frame.set_line(0, "Location set");
            frame.set_line(1, location);
        }
        InputPrompt::Rejected | InputPrompt::Unknown => {
            frame.set_line(0, "Invalid location");
            frame.set_line(1, "Try again");
        }
    }
}

/// Position of the scrolling headline window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NewsCursor {
    index: usize,
    offset: usize,
}

impl NewsCursor {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Scroll the current headline, moving to the next once it has been read
    pub fn advance(&mut self, headlines: &[Headline]) {
        let Some(current) = headlines.get(self.index) else {
            self.reset();
            return;
        };
        let len = current.text.chars().count();
        if self.offset + DISPLAY_COLS >= len {
            self.index = (self.index + 1) % headlines.len();
            self.offset = 0;
        } else {
            self.offset += SCROLL_STEP;
        }
    }

    /// Visible tail of the current headline
    fn window<'a>(&self, headlines: &'a [Headline]) -> Option<&'a str> {
        let text = headlines.get(self.index)?.text.as_str();
        let start = text
            .char_indices()
            .nth(self.offset)
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        Some(&text[start..])
    }
}

/// News screen: source and position, then the scrolling headline
pub fn render_news(
    frame: &mut TextFrame,
    source: &str,
    headlines: &[Headline],
    cursor: NewsCursor,
    fetching: bool,
) {
    match cursor.window(headlines) {
        Some(text) => {
            frame.line_fmt(
                0,
                format_args!("{} {}/{}", source, cursor.index() + 1, headlines.len()),
            );
            frame.set_line(1, text);
        }
        None => {
            frame.line_fmt(0, format_args!("{} news", source));
            frame.set_line(1, if fetching { "Fetching..." } else { "No headlines" });
        }
    }
}
