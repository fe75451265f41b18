//! Main tick loop
//!
//! One `Station` is driven by one task: every message from the control
//! channel goes through [`Station::handle`]. Ticks run the full loop pass;
//! button presses and fetch results update state and redraw right away.

use super::{Action, Controller, Diagnostics, FetchRequests};
use crate::alarm::AlarmEvent;
use crate::config::ClockConfig;
use crate::error::Fault;
use crate::input::ButtonEvent;
use crate::render::TextFrame;
use crate::traits::{CharDisplay, ClimateSensor, FetchOutcome, Indicator, TextInput};

/// Everything the controller task receives
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    /// Raw edge from a button task
    Button(ButtonEvent),
    /// Wake interval elapsed
    Tick,
    /// Fetch worker finished a request
    Fetched(FetchOutcome),
}

/// Side effects of handling one message, for the caller to carry out or log
#[derive(Debug, Clone, Default)]
pub struct Step {
    /// Fetches to hand to the worker
    pub requests: FetchRequests,
    pub action: Option<Action>,
    pub alarm: Option<AlarmEvent>,
    /// Present on ticks
    pub heartbeat: Option<Diagnostics>,
}

/// Controller plus the hardware it renders to and samples from
pub struct Station<D, S, I, L> {
    controller: Controller,
    frame: TextFrame,
    display: D,
    sensor: S,
    input: I,
    led: L,
}

impl<D, S, I, L> Station<D, S, I, L>
where
    D: CharDisplay,
    S: ClimateSensor,
    I: TextInput,
    L: Indicator,
{
    pub fn new(config: ClockConfig, display: D, sensor: S, input: I, led: L) -> Self {
        Self {
            controller: Controller::new(config),
            frame: TextFrame::new(),
            display,
            sensor,
            input,
            led,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn handle(&mut self, message: Message, now_ms: u64) -> Step {
        let mut step = Step::default();
        match message {
            Message::Button(event) => {
                step.action = self.controller.handle_button(event);
                if step.action.is_some() {
                    self.render(now_ms);
                }
            }
            Message::Tick => {
                let outcome = self
                    .controller
                    .tick(now_ms, &mut self.sensor, &mut self.input);
                self.render(now_ms);
                self.led.toggle();
                step.requests = outcome.requests;
                step.alarm = outcome.alarm;
                step.heartbeat = Some(self.controller.diagnostics(now_ms));
            }
            Message::Fetched(outcome) => {
                self.controller.apply_fetch(outcome, now_ms);
                self.render(now_ms);
            }
        }
        step
    }

    fn render(&mut self, now_ms: u64) {
        if self.controller.take_clear() {
            if let Err(e) = self.display.clear() {
                self.controller.record(Fault::Display(e));
            }
            self.frame.invalidate();
        }
        self.controller.render(now_ms, &mut self.frame);
        if let Err(e) = self.frame.flush(&mut self.display) {
            self.controller.record(Fault::Display(e));
        }
    }
}
