use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::string::{String, ToString};

use nimbus_protocol::documents::truncated;
use nimbus_protocol::{Headline, TimeDocument};

use super::*;
use crate::input::{ButtonEvent, LocationError};
use crate::traits::{CharDisplay, DisplayError, Indicator};

/// 2025-10-16 06:59:50 local
const BEFORE_SEVEN: u64 = 1_760_597_990;

#[derive(Default)]
struct PanelState {
    rows: [String; 2],
    clears: usize,
    backlight: Option<Rgb>,
}

#[derive(Clone, Default)]
struct Panel(Rc<RefCell<PanelState>>);

impl Panel {
    fn row(&self, row: usize) -> String {
        self.0.borrow().rows[row].clone()
    }
}

impl CharDisplay for Panel {
    fn clear(&mut self) -> Result<(), DisplayError> {
        let mut state = self.0.borrow_mut();
        state.rows = Default::default();
        state.clears += 1;
        Ok(())
    }

    fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        let mut state = self.0.borrow_mut();
        let slot = state
            .rows
            .get_mut(usize::from(row))
            .ok_or(DisplayError::InvalidRow)?;
        *slot = text.to_string();
        Ok(())
    }

    fn set_backlight(&mut self, color: Rgb) -> Result<(), DisplayError> {
        self.0.borrow_mut().backlight = Some(color);
        Ok(())
    }
}

struct FixedSensor(Result<ClimateReading, SensorError>);

impl ClimateSensor for FixedSensor {
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        self.0
    }
}

#[derive(Clone, Default)]
struct Keyboard(Rc<RefCell<Option<Location>>>);

impl Keyboard {
    fn type_line(&self, text: &str) {
        *self.0.borrow_mut() = Some(truncated(text));
    }
}

impl TextInput for Keyboard {
    fn poll_line(&mut self) -> Option<Location> {
        self.0.borrow_mut().take()
    }
}

#[derive(Clone, Default)]
struct Led(Rc<Cell<usize>>);

impl Indicator for Led {
    fn toggle(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

type TestStation = Station<Panel, FixedSensor, Keyboard, Led>;

fn good_sensor() -> FixedSensor {
    FixedSensor(Ok(ClimateReading {
        temp_c_x10: 215,
        humidity_x10: 402,
    }))
}

fn armed_config() -> ClockConfig {
    ClockConfig {
        alarm_enabled: true,
        ..Default::default()
    }
}

fn station(config: ClockConfig) -> (TestStation, Panel, Keyboard, Led) {
    station_with(config, good_sensor())
}

fn station_with(config: ClockConfig, sensor: FixedSensor) -> (TestStation, Panel, Keyboard, Led) {
    let panel = Panel::default();
    let keyboard = Keyboard::default();
    let led = Led::default();
    let station = Station::new(
        config,
        panel.clone(),
        sensor,
        keyboard.clone(),
        led.clone(),
    );
    (station, panel, keyboard, led)
}

fn time_doc(unix_secs: u64) -> TimeDocument {
    TimeDocument {
        unix_secs,
        utc_offset_secs: 0,
        dst: false,
        timezone: truncated("UTC"),
    }
}

fn weather_for(location: &str, condition: &str, temp_c_x10: i16) -> FetchOutcome {
    FetchOutcome::Weather {
        location: truncated(location),
        result: Ok(WeatherSummary {
            location: truncated(location),
            condition: truncated(condition),
            temp_c_x10,
            humidity_pct: 70,
        }),
    }
}

fn press<S>(target: &mut S, button: Button, from_ms: u64, to_ms: u64) -> Option<Action>
where
    S: FnMut(ButtonEvent) -> Option<Action>,
{
    assert_eq!(target(ButtonEvent::press(button, from_ms)), None);
    target(ButtonEvent::release(button, to_ms))
}

fn station_press(station: &mut TestStation, button: Button, from_ms: u64, to_ms: u64) -> Option<Action> {
    press(
        &mut |event: ButtonEvent| station.handle(Message::Button(event), event.at_ms).action,
        button,
        from_ms,
        to_ms,
    )
}

fn long_press(controller: &mut Controller, at_ms: u64) -> Option<Action> {
    press(
        &mut |event: ButtonEvent| controller.handle_button(event),
        Button::AlarmToggle,
        at_ms - 600,
        at_ms,
    )
}

#[test]
fn test_wake_snooze_resume_through_station() {
    let (mut station, panel, _, _) = station(armed_config());

    let step = station.handle(Message::Tick, 0);
    assert_eq!(step.requests.as_slice(), &[FetchRequest::Time]);

    station.handle(Message::Fetched(FetchOutcome::Time(Ok(time_doc(BEFORE_SEVEN)))), 100);
    assert_eq!(panel.row(0), "06:59 Thu 16 Oct");

    assert_eq!(station.handle(Message::Tick, 5_100).alarm, None);

    // 07:00:03
    let step = station.handle(Message::Tick, 13_100);
    assert_eq!(step.alarm, Some(AlarmEvent::Triggered));
    assert_eq!(panel.row(1), "WAKE UP!   07:00");
    assert_eq!(panel.0.borrow().backlight, Some(Rgb::RED));

    // Snooze released at 07:00:04
    let action = station_press(&mut station, Button::Snooze, 14_000, 14_200);
    let until = Timestamp::from_secs(BEFORE_SEVEN + 314);
    assert_eq!(action, Some(Action::Snoozed { until }));
    assert_eq!(panel.row(1), "Snooze til 07:05");
    assert_eq!(panel.0.borrow().backlight, Some(Rgb::AMBER));

    // 07:04:00
    assert_eq!(station.handle(Message::Tick, 250_100).alarm, None);
    assert!(!station.controller().alarm().state().active);

    // 07:05:10
    let step = station.handle(Message::Tick, 320_100);
    assert_eq!(step.alarm, Some(AlarmEvent::Resumed));
    assert!(station.controller().alarm().state().active);
}

#[test]
fn test_snooze_without_ringing_does_nothing() {
    let (mut station, _, _, _) = station(armed_config());
    station.handle(Message::Fetched(FetchOutcome::Time(Ok(time_doc(BEFORE_SEVEN - 3_600)))), 0);
    let before = *station.controller().alarm().state();

    assert_eq!(station_press(&mut station, Button::Snooze, 1_000, 1_100), None);
    assert_eq!(*station.controller().alarm().state(), before);
}

#[test]
fn test_short_and_long_press_on_toggle() {
    let mut controller = Controller::new(ClockConfig::default());
    let short = press(
        &mut |e: ButtonEvent| controller.handle_button(e),
        Button::AlarmToggle,
        0,
        120,
    );
    assert_eq!(short, Some(Action::AlarmToggled { enabled: true }));
    assert_eq!(controller.screen(), Screen::Default);

    assert_eq!(
        long_press(&mut controller, 2_000),
        Some(Action::ScreenChanged(Screen::TempHumidity))
    );
    assert!(controller.alarm().state().enabled);
}

#[test]
fn test_bounce_changes_nothing() {
    let mut controller = Controller::new(ClockConfig::default());
    let bounce = press(&mut |e: ButtonEvent| controller.handle_button(e), Button::AlarmToggle, 0, 30);
    assert_eq!(bounce, None);
    assert!(!controller.alarm().state().enabled);
}

#[test]
fn test_hour_and_minute_buttons_adjust_alarm() {
    let mut controller = Controller::new(ClockConfig::default());
    let hour = press(&mut |e: ButtonEvent| controller.handle_button(e), Button::Hour, 0, 100);
    assert_eq!(hour, Some(Action::AlarmTimeSet(TimeOfDay::new(8, 0).unwrap())));
    let minute = press(&mut |e: ButtonEvent| controller.handle_button(e), Button::Minute, 200, 900);
    assert_eq!(minute, Some(Action::AlarmTimeSet(TimeOfDay::new(8, 1).unwrap())));
}

#[test]
fn test_rotation_clears_panel_and_cycles() {
    let (mut station, panel, _, _) = station(ClockConfig::default());
    for (i, expected) in [
        Screen::TempHumidity,
        Screen::Weather,
        Screen::UserInput,
        Screen::NewsFeed,
        Screen::Default,
    ]
    .into_iter()
    .enumerate()
    {
        let at = 1_000 * (i as u64 + 1);
        let action = station_press(&mut station, Button::AlarmToggle, at - 700, at);
        assert_eq!(action, Some(Action::ScreenChanged(expected)));
    }
    assert_eq!(panel.0.borrow().clears, 5);
    assert_eq!(station.controller().screen(), Screen::Default);
}

#[test]
fn test_news_window_returns_to_clock_without_clearing() {
    let (mut station, panel, _, _) = station(ClockConfig::default());
    for at in [1_000, 2_000, 3_000, 4_000] {
        station_press(&mut station, Button::AlarmToggle, at - 600, at);
    }
    assert_eq!(station.controller().screen(), Screen::NewsFeed);
    let clears = panel.0.borrow().clears;

    station.handle(Message::Tick, 4_000 + 29_000);
    assert_eq!(station.controller().screen(), Screen::NewsFeed);

    station.handle(Message::Tick, 4_000 + 31_000);
    assert_eq!(station.controller().screen(), Screen::Default);
    assert_eq!(panel.0.borrow().clears, clears);
    assert_eq!(panel.row(0), "--:-- syncing");
}

#[test]
fn test_failed_time_fetch_retries_at_next_interval() {
    let mut controller = Controller::new(ClockConfig::default());
    let mut sensor = good_sensor();
    let mut keyboard = Keyboard::default();

    assert_eq!(
        controller.tick(0, &mut sensor, &mut keyboard).requests.as_slice(),
        &[FetchRequest::Time]
    );
    controller.apply_fetch(FetchOutcome::Time(Ok(time_doc(BEFORE_SEVEN))), 200);

    assert_eq!(
        controller.tick(60_000, &mut sensor, &mut keyboard).requests.as_slice(),
        &[FetchRequest::Time]
    );
    controller.apply_fetch(FetchOutcome::failed(&FetchRequest::Time, FetchError::Timeout), 64_000);
    assert_eq!(
        controller.last_fault(),
        Some(Fault::TransientFetch(FetchKind::Time, FetchError::Timeout))
    );

    for now in (65_000..120_000).step_by(5_000) {
        assert!(controller.tick(now, &mut sensor, &mut keyboard).requests.is_empty());
    }
    assert_eq!(
        controller.tick(120_000, &mut sensor, &mut keyboard).requests.as_slice(),
        &[FetchRequest::Time]
    );
    // Cached time survives the failure
    assert!(controller.wall_time(120_000).is_some());
}

#[test]
fn test_outstanding_fetch_not_duplicated() {
    let config = ClockConfig {
        time_refresh_ms: 5_000,
        ..Default::default()
    };
    let mut controller = Controller::new(config);
    let mut sensor = good_sensor();
    let mut keyboard = Keyboard::default();

    assert_eq!(controller.tick(0, &mut sensor, &mut keyboard).requests.len(), 1);
    // Still waiting on the first answer
    assert!(controller.tick(5_000, &mut sensor, &mut keyboard).requests.is_empty());
    // Twice the fetch timeout has passed; the first request is presumed lost
    assert_eq!(controller.tick(10_000, &mut sensor, &mut keyboard).requests.len(), 1);
}

#[test]
fn test_weather_screen_fetches_configured_location() {
    let mut controller = Controller::new(ClockConfig::default());
    let mut sensor = good_sensor();
    let mut keyboard = Keyboard::default();
    controller.tick(0, &mut sensor, &mut keyboard);
    controller.apply_fetch(FetchOutcome::failed(&FetchRequest::Time, FetchError::Network), 10);

    long_press(&mut controller, 1_000);
    long_press(&mut controller, 2_000);
    assert_eq!(controller.screen(), Screen::Weather);

    let out = controller.tick(5_000, &mut sensor, &mut keyboard);
    assert_eq!(
        out.requests.as_slice(),
        &[FetchRequest::Weather(truncated("Oslo"))]
    );

    let mut frame = TextFrame::new();
    controller.render(5_000, &mut frame);
    assert_eq!(frame.line(1), "Fetching...");

    controller.apply_fetch(
        weather_for("Oslo", "Cloudy", 42),
        6_000,
    );
    controller.render(6_000, &mut frame);
    assert_eq!(frame.line(1), "4.2C Cloudy");
}

#[test]
fn test_location_entry_flow() {
    let mut controller = Controller::new(ClockConfig::default());
    let mut sensor = good_sensor();
    let keyboard = Keyboard::default();
    let mut input = keyboard.clone();
    for at in [1_000, 2_000, 3_000] {
        long_press(&mut controller, at);
    }
    assert_eq!(controller.screen(), Screen::UserInput);

    keyboard.type_line("   ");
    let out = controller.tick(5_000, &mut sensor, &mut input);
    assert!(out.requests.iter().all(|r| r.kind() != FetchKind::Weather));
    assert_eq!(
        controller.last_fault(),
        Some(Fault::InvalidUserInput(LocationError::Empty))
    );
    let mut frame = TextFrame::new();
    controller.render(5_000, &mut frame);
    assert_eq!(frame.line(0), "Invalid location");

    keyboard.type_line("Bergen");
    let out = controller.tick(10_000, &mut sensor, &mut input);
    assert_eq!(
        out.requests.as_slice(),
        &[FetchRequest::Weather(truncated("Bergen"))]
    );
    assert_eq!(controller.location(), "Bergen");

    // Nothing typed: the accepted input is not processed again
    let out = controller.tick(15_000, &mut sensor, &mut input);
    assert!(out.requests.iter().all(|r| r.kind() != FetchKind::Weather));

    controller.apply_fetch(
        FetchOutcome::failed(&FetchRequest::Weather(truncated("Bergen")), FetchError::NotFound),
        16_000,
    );
    assert_eq!(controller.last_fault(), Some(Fault::UnknownLocation));
    controller.render(16_000, &mut frame);
    assert_eq!(frame.line(0), "Invalid location");
}

#[test]
fn test_answer_for_replaced_location_is_dropped() {
    let mut controller = Controller::new(ClockConfig::default());
    let mut sensor = good_sensor();
    let keyboard = Keyboard::default();
    let mut input = keyboard.clone();
    for at in [1_000, 2_000, 3_000] {
        long_press(&mut controller, at);
    }

    keyboard.type_line("Atlantis");
    controller.tick(5_000, &mut sensor, &mut input);
    keyboard.type_line("Bergen");
    let out = controller.tick(10_000, &mut sensor, &mut input);
    assert_eq!(
        out.requests.as_slice(),
        &[FetchRequest::Weather(truncated("Bergen"))]
    );

    // The Atlantis lookup answers late
    controller.apply_fetch(
        FetchOutcome::failed(&FetchRequest::Weather(truncated("Atlantis")), FetchError::NotFound),
        11_000,
    );
    assert_eq!(controller.last_fault(), None);
    let mut frame = TextFrame::new();
    controller.render(11_000, &mut frame);
    assert_eq!(frame.line(0), "Location set");
    assert_eq!(frame.line(1), "Bergen");

    // Bergen is still outstanding, so the next tick asks for nothing new
    let out = controller.tick(12_000, &mut sensor, &mut input);
    assert!(out.requests.iter().all(|r| r.kind() != FetchKind::Weather));

    controller.apply_fetch(weather_for("Atlantis", "Sunny", 280), 12_500);
    controller.apply_fetch(weather_for("Bergen", "Rain", 15), 13_000);
    assert_eq!(controller.last_fault(), None);
    controller.render(13_000, &mut frame);
    assert_eq!(frame.line(0), "Location set");

    long_press(&mut controller, 14_000);
    long_press(&mut controller, 15_000);
    long_press(&mut controller, 16_000);
    long_press(&mut controller, 17_000);
    assert_eq!(controller.screen(), Screen::Weather);
    controller.render(17_000, &mut frame);
    assert_eq!(frame.line(0), "Bergen");
    assert_eq!(frame.line(1), "1.5C Rain");
}

#[test]
fn test_recognized_location_clears_unknown_prompt() {
    let mut controller = Controller::new(ClockConfig::default());
    let mut sensor = good_sensor();
    let keyboard = Keyboard::default();
    let mut input = keyboard.clone();
    for at in [1_000, 2_000, 3_000] {
        long_press(&mut controller, at);
    }

    keyboard.type_line("Bergen");
    controller.tick(5_000, &mut sensor, &mut input);
    let bergen = FetchRequest::Weather(truncated("Bergen"));
    controller.apply_fetch(FetchOutcome::failed(&bergen, FetchError::NotFound), 6_000);
    let mut frame = TextFrame::new();
    controller.render(6_000, &mut frame);
    assert_eq!(frame.line(0), "Invalid location");

    controller.apply_fetch(weather_for("Bergen", "Rain", 15), 7_000);
    controller.render(7_000, &mut frame);
    assert_eq!(frame.line(0), "Location set");
    assert_eq!(frame.line(1), "Bergen");
}

#[test]
fn test_time_sync_anchors_between_issue_and_reply() {
    let mut controller = Controller::new(ClockConfig::default());
    let mut sensor = good_sensor();
    let mut keyboard = Keyboard::default();

    assert_eq!(
        controller.tick(0, &mut sensor, &mut keyboard).requests.as_slice(),
        &[FetchRequest::Time]
    );
    // Slow link: the answer lands four seconds after the request went out
    controller.apply_fetch(FetchOutcome::Time(Ok(time_doc(BEFORE_SEVEN))), 4_000);

    assert_eq!(
        controller.wall_time(4_000),
        Some(Timestamp::from_secs(BEFORE_SEVEN + 2))
    );
    assert_eq!(
        controller.wall_time(12_000),
        Some(Timestamp::from_secs(BEFORE_SEVEN + 10))
    );
}

#[test]
fn test_unrequested_time_document_anchors_at_receipt() {
    let mut controller = Controller::new(ClockConfig::default());
    controller.apply_fetch(FetchOutcome::Time(Ok(time_doc(BEFORE_SEVEN))), 4_000);
    assert_eq!(
        controller.wall_time(4_000),
        Some(Timestamp::from_secs(BEFORE_SEVEN))
    );
}

#[test]
fn test_sensor_failure_shows_placeholder() {
    let (mut station, panel, _, _) =
        station_with(ClockConfig::default(), FixedSensor(Err(SensorError::Bus)));
    station_press(&mut station, Button::AlarmToggle, 400, 1_000);

    station.handle(Message::Tick, 5_000);
    assert_eq!(panel.row(1), "No sensor data");
    assert_eq!(
        station.controller().last_fault(),
        Some(Fault::SensorRead(SensorError::Bus))
    );
}

#[test]
fn test_news_headlines_scroll_on_ticks() {
    let mut controller = Controller::new(ClockConfig::default());
    let mut sensor = good_sensor();
    let mut keyboard = Keyboard::default();
    for at in [1_000, 2_000, 3_000, 4_000] {
        long_press(&mut controller, at);
    }
    let out = controller.tick(5_000, &mut sensor, &mut keyboard);
    assert!(out.requests.contains(&FetchRequest::News));

    let mut headlines = Headlines::new();
    headlines.push(Headline::new("Markets rally")).unwrap();
    headlines.push(Headline::new("Storm warning")).unwrap();
    controller.apply_fetch(FetchOutcome::News(Ok(headlines)), 6_000);

    let mut frame = TextFrame::new();
    controller.render(6_000, &mut frame);
    assert_eq!(frame.line(0), "CNN 1/2");
    assert_eq!(frame.line(1), "Markets rally");

    // First tick after new headlines keeps the window, the next one moves on
    controller.tick(10_000, &mut sensor, &mut keyboard);
    controller.render(10_000, &mut frame);
    assert_eq!(frame.line(1), "Markets rally");
    controller.tick(15_000, &mut sensor, &mut keyboard);
    controller.render(15_000, &mut frame);
    assert_eq!(frame.line(0), "CNN 2/2");
}

#[test]
fn test_heartbeat_every_tick() {
    let (mut station, _, _, led) = station(ClockConfig::default());
    for i in 0..3 {
        let step = station.handle(Message::Tick, i * 5_000);
        let heartbeat = step.heartbeat.unwrap();
        assert_eq!(heartbeat.uptime_s, i * 5);
        assert_eq!(heartbeat.screen, Screen::Default);
    }
    assert_eq!(led.0.get(), 3);

    let action = station_press(&mut station, Button::Hour, 16_000, 16_100);
    assert!(action.is_some());
    assert_eq!(led.0.get(), 3);
}
