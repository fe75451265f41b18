//! Press classification
//!
//! A press opens a session; the matching release closes it and yields at most
//! one classified event. Durations below the debounce floor are contact bounce
//! and produce nothing.

use super::button::{Button, ButtonEvent, Edge};
use crate::config::{DEBOUNCE_FLOOR_MS, LONG_PRESS_MS, STALE_PRESS_MS};

/// Result of a completed press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    Short,
    Long,
}

/// A classified press on a specific button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClassifiedPress {
    pub button: Button,
    pub kind: PressKind,
    /// Monotonic time of the release that completed the press
    pub at_ms: u64,
}

/// Duration thresholds for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    /// Presses shorter than this are discarded
    pub debounce_ms: u64,
    /// Presses at least this long are `Long`
    pub long_press_ms: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_FLOOR_MS,
            long_press_ms: LONG_PRESS_MS,
        }
    }
}

impl Thresholds {
    /// Classify a hold duration
    pub fn classify(&self, held_ms: u64) -> Option<PressKind> {
        if held_ms < self.debounce_ms {
            None
        } else if held_ms < self.long_press_ms {
            Some(PressKind::Short)
        } else {
            Some(PressKind::Long)
        }
    }
}

/// Press session for a single button
#[derive(Debug, Clone, Copy)]
pub struct PressClassifier {
    thresholds: Thresholds,
    /// Start of the open session, if any
    started_ms: Option<u64>,
}

impl PressClassifier {
    pub const fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            started_ms: None,
        }
    }

    /// Whether a press is currently held
    pub fn is_held(&self) -> bool {
        self.started_ms.is_some()
    }

    /// Open a session
    ///
    /// A second press while one is open is ignored, unless the open session
    /// is older than [`STALE_PRESS_MS`]. Its release was lost, so the new
    /// press starts over.
    pub fn press(&mut self, at_ms: u64) {
        match self.started_ms {
            Some(started) if at_ms.saturating_sub(started) < STALE_PRESS_MS => {}
            _ => self.started_ms = Some(at_ms),
        }
    }

    /// Close the session, classifying the hold time
    ///
    /// A release without a matching press yields nothing.
    pub fn release(&mut self, at_ms: u64) -> Option<PressKind> {
        let started = self.started_ms.take()?;
        self.thresholds.classify(at_ms.saturating_sub(started))
    }
}

/// Independent press sessions for every button
#[derive(Debug, Clone)]
pub struct ButtonClassifier {
    sessions: [PressClassifier; Button::COUNT],
}

impl Default for ButtonClassifier {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

impl ButtonClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            sessions: [PressClassifier::new(thresholds); Button::COUNT],
        }
    }

    /// Feed one edge, returning a classified press when a session completes
    pub fn classify(&mut self, event: ButtonEvent) -> Option<ClassifiedPress> {
        let session = &mut self.sessions[event.button.index()];
        match event.edge {
            Edge::Press => {
                session.press(event.at_ms);
                None
            }
            Edge::Release => session.release(event.at_ms).map(|kind| ClassifiedPress {
                button: event.button,
                kind,
                at_ms: event.at_ms,
            }),
        }
    }

    /// Whether any button is currently held down
    pub fn any_held(&self) -> bool {
        self.sessions.iter().any(PressClassifier::is_held)
    }
}
