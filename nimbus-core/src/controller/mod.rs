//! Application controller
//!
//! [`Controller`] owns all application state and applies classified button
//! presses, fetch outcomes, and ticks to it. [`Station`] wraps it with the
//! hardware collaborators and is what the firmware's controller task runs.

mod station;

pub use station::{Message, Station, Step};

use heapless::Vec;
use nimbus_protocol::{Location, WeatherSummary};

use crate::alarm::{AlarmEngine, AlarmEvent, AlarmSettings, AlarmStatus};
use crate::config::ClockConfig;
use crate::error::Fault;
use crate::input::{parse_location, Button, ButtonClassifier, ButtonEvent, PressKind};
use crate::render::{
    render_climate, render_clock, render_location, render_news, render_weather, InputPrompt,
    NewsCursor, TextFrame, WeatherView,
};
use crate::scheduler::{FetchKind, RefreshScheduler};
use crate::state::{Navigator, Screen};
use crate::time::{TimeOfDay, Timestamp, WallClock};
use crate::traits::{
    ClimateReading, ClimateSensor, FetchError, FetchOutcome, FetchRequest, Headlines, Rgb,
    SensorError, TextInput,
};

/// Fetches issued by one tick
pub type FetchRequests = Vec<FetchRequest, { FetchKind::COUNT }>;

/// What a button press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    AlarmToggled { enabled: bool },
    Snoozed { until: Timestamp },
    Muted,
    AlarmTimeSet(TimeOfDay),
    ScreenChanged(Screen),
}

/// Result of one tick
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub requests: FetchRequests,
    pub alarm: Option<AlarmEvent>,
    /// The news screen timed out back to the clock
    pub news_timed_out: bool,
}

/// Heartbeat diagnostic snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    pub uptime_s: u64,
    pub screen: Screen,
    pub alarm: AlarmStatus,
    pub wall_time: Option<Timestamp>,
    pub last_fault: Option<Fault>,
}

pub struct Controller {
    config: ClockConfig,
    buttons: ButtonClassifier,
    screens: Navigator,
    alarm: AlarmEngine,
    refresh: RefreshScheduler,
    clock: WallClock,
    climate: Option<Result<ClimateReading, SensorError>>,
    weather: Option<WeatherSummary>,
    weather_failed: bool,
    /// A new location needs a lookup
    weather_wanted: bool,
    headlines: Headlines,
    news: NewsCursor,
    /// Headline window was just reset; show it for a full tick before scrolling
    news_fresh: bool,
    location: Location,
    prompt: InputPrompt,
    /// Issue time of each outstanding fetch
    in_flight: [Option<u64>; FetchKind::COUNT],
    last_fault: Option<Fault>,
}

impl Controller {
    pub fn new(config: ClockConfig) -> Self {
        let settings = AlarmSettings {
            snooze_secs: config.snooze_secs,
            ring_limit_secs: config.ring_limit_secs,
        };
        Self {
            buttons: ButtonClassifier::new(config.thresholds()),
            screens: Navigator::new(config.news_display_ms),
            alarm: AlarmEngine::new(config.alarm_time, config.alarm_enabled, settings),
            refresh: RefreshScheduler::new(&config),
            clock: WallClock::new(),
            climate: None,
            weather: None,
            weather_failed: false,
            weather_wanted: false,
            headlines: Headlines::new(),
            news: NewsCursor::default(),
            news_fresh: true,
            location: config.location.clone(),
            prompt: InputPrompt::Waiting,
            in_flight: [None; FetchKind::COUNT],
            last_fault: None,
            config,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screens.current()
    }

    pub fn alarm(&self) -> &AlarmEngine {
        &self.alarm
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn wall_time(&self, now_ms: u64) -> Option<Timestamp> {
        self.clock.now(now_ms)
    }

    pub fn last_fault(&self) -> Option<Fault> {
        self.last_fault
    }

    pub fn record(&mut self, fault: Fault) {
        self.last_fault = Some(fault);
    }

    /// Feed a raw button edge
    ///
    /// Returns what the press did, or `None` for bounce, an unfinished
    /// press, or a press that was a no-op (snooze while silent).
    pub fn handle_button(&mut self, event: ButtonEvent) -> Option<Action> {
        let press = self.buttons.classify(event)?;
        match (press.button, press.kind) {
            (Button::AlarmToggle, PressKind::Long) => {
                let screen = self.screens.rotate(press.at_ms);
                self.on_enter(screen);
                Some(Action::ScreenChanged(screen))
            }
            (Button::AlarmToggle, PressKind::Short) => Some(Action::AlarmToggled {
                enabled: self.alarm.toggle(),
            }),
            (Button::Snooze, _) => {
                let now = self.clock.now(press.at_ms)?;
                self.alarm
                    .snooze(now)
                    .map(|until| Action::Snoozed { until })
            }
            (Button::Mute, _) => self.alarm.mute().then_some(Action::Muted),
            (Button::Hour, _) => Some(Action::AlarmTimeSet(self.alarm.increment_hour())),
            (Button::Minute, _) => Some(Action::AlarmTimeSet(self.alarm.increment_minute())),
        }
    }

    /// One pass of the main loop, minus rendering
    ///
    /// Order: refresh scheduling, the news timeout, the alarm, then the
    /// active screen's update step.
    pub fn tick<S, I>(&mut self, now_ms: u64, sensor: &mut S, input: &mut I) -> TickOutcome
    where
        S: ClimateSensor,
        I: TextInput,
    {
        let mut out = TickOutcome::default();

        for kind in self.refresh.poll(now_ms, self.screens.current()) {
            self.request(kind, now_ms, &mut out.requests);
        }

        out.news_timed_out = self.screens.check_timeout(now_ms);

        if let Some(now) = self.clock.now(now_ms) {
            out.alarm = self.alarm.evaluate(now);
        }

        match self.screens.current() {
            Screen::Default => {}
            Screen::TempHumidity => {
                let reading = sensor.read();
                if let Err(e) = reading {
                    self.record(Fault::SensorRead(e));
                }
                self.climate = Some(reading);
            }
            Screen::Weather => self.request_wanted_weather(now_ms, &mut out.requests),
            Screen::UserInput => {
                if let Some(text) = input.poll_line() {
                    self.submit_location(&text);
                }
                self.request_wanted_weather(now_ms, &mut out.requests);
            }
            Screen::NewsFeed => {
                if self.news_fresh {
                    self.news_fresh = false;
                } else {
                    self.news.advance(&self.headlines);
                }
            }
        }

        out
    }

    /// Apply the result of a fetch
    ///
    /// A weather answer for a location other than the current one belongs
    /// to an abandoned lookup and is dropped without touching any state.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome, now_ms: u64) {
        if let FetchOutcome::Weather { location, .. } = &outcome {
            if *location != self.location {
                return;
            }
        }

        let kind = outcome.kind();
        let issued = self.in_flight[kind.index()].take();

        match outcome {
            FetchOutcome::Time(Ok(doc)) => {
                // The document was read somewhere between issue and receipt
                let anchor = issued.map_or(now_ms, |at| at + now_ms.saturating_sub(at) / 2);
                self.clock.sync(&doc, anchor);
            }
            FetchOutcome::Weather { result: Ok(summary), .. } => {
                self.weather = Some(summary);
                self.weather_failed = false;
                if self.prompt == InputPrompt::Unknown {
                    self.prompt = InputPrompt::Accepted;
                }
            }
            FetchOutcome::Weather {
                result: Err(FetchError::NotFound),
                ..
            } => {
                self.weather_failed = true;
                self.prompt = InputPrompt::Unknown;
                self.record(Fault::UnknownLocation);
            }
            FetchOutcome::News(Ok(headlines)) => {
                self.headlines = headlines;
                self.news.reset();
                self.news_fresh = true;
            }
            FetchOutcome::Weather { result: Err(e), .. } => {
                self.weather_failed = true;
                self.record(Fault::TransientFetch(kind, e));
            }
            FetchOutcome::Time(Err(e)) | FetchOutcome::News(Err(e)) => {
                self.record(Fault::TransientFetch(kind, e));
            }
        }
    }

    /// Render the active screen
    pub fn render(&self, now_ms: u64, frame: &mut TextFrame) {
        match self.screens.current() {
            Screen::Default => render_clock(frame, self.clock.now(now_ms), &self.alarm),
            Screen::TempHumidity => render_climate(frame, self.climate),
            Screen::Weather => render_weather(
                frame,
                WeatherView {
                    summary: self.weather.as_ref(),
                    location: &self.location,
                    fetching: self.is_in_flight(FetchKind::Weather, now_ms),
                    failed: self.weather_failed,
                },
            ),
            Screen::UserInput => render_location(frame, self.prompt, &self.location),
            Screen::NewsFeed => render_news(
                frame,
                &self.config.news_source,
                &self.headlines,
                self.news,
                self.is_in_flight(FetchKind::News, now_ms),
            ),
        }
        frame.set_backlight(self.backlight());
    }

    /// Whether the panel should be wiped before the next render
    pub fn take_clear(&mut self) -> bool {
        self.screens.take_clear()
    }

    pub fn backlight(&self) -> Rgb {
        match self.alarm.status() {
            AlarmStatus::Ringing => Rgb::RED,
            AlarmStatus::Snoozed(_) => Rgb::AMBER,
            _ => Rgb::WHITE,
        }
    }

    pub fn diagnostics(&self, now_ms: u64) -> Diagnostics {
        Diagnostics {
            uptime_s: now_ms / 1_000,
            screen: self.screens.current(),
            alarm: self.alarm.status(),
            wall_time: self.clock.now(now_ms),
            last_fault: self.last_fault,
        }
    }

    fn on_enter(&mut self, screen: Screen) {
        match screen {
            Screen::UserInput => self.prompt = InputPrompt::Waiting,
            Screen::NewsFeed => {
                self.news.reset();
                self.news_fresh = true;
            }
            Screen::Default | Screen::TempHumidity | Screen::Weather => {}
        }
    }

    fn submit_location(&mut self, text: &str) {
        match parse_location(text) {
            Ok(location) => {
                self.location = location;
                self.weather = None;
                self.weather_failed = false;
                self.weather_wanted = true;
                self.prompt = InputPrompt::Accepted;
                // A lookup for the old location no longer matters
                self.in_flight[FetchKind::Weather.index()] = None;
            }
            Err(e) => {
                self.prompt = InputPrompt::Rejected;
                self.record(Fault::InvalidUserInput(e));
            }
        }
    }

    fn request_wanted_weather(&mut self, now_ms: u64, requests: &mut FetchRequests) {
        if self.weather_wanted {
            self.weather_wanted = false;
            self.refresh.mark(FetchKind::Weather, now_ms);
            self.request(FetchKind::Weather, now_ms, requests);
        }
    }

    /// An outstanding fetch counts as lost after twice the fetch timeout
    fn is_in_flight(&self, kind: FetchKind, now_ms: u64) -> bool {
        let horizon = self.config.fetch_timeout_ms.saturating_mul(2);
        self.in_flight[kind.index()].is_some_and(|issued| now_ms.saturating_sub(issued) < horizon)
    }

    fn request(&mut self, kind: FetchKind, now_ms: u64, requests: &mut FetchRequests) {
        if self.is_in_flight(kind, now_ms) {
            return;
        }
        let request = match kind {
            FetchKind::Time => FetchRequest::Time,
            FetchKind::Weather => FetchRequest::Weather(self.location.clone()),
            FetchKind::News => FetchRequest::News,
        };
        if requests.push(request).is_ok() {
            self.in_flight[kind.index()] = Some(now_ms);
        }
    }
}

#[cfg(test)]
mod tests;
