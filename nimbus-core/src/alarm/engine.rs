//! Alarm state and transitions
//!
//! Invariants:
//! - `active` implies `enabled`
//! - while `snoozed_until` is set, `active` stays clear until it elapses
//! - the alarm fires at most once per calendar minute

use crate::config::{RING_LIMIT_SECS, SNOOZE_SECS};
use crate::time::{TimeOfDay, Timestamp};

/// Alarm durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmSettings {
    pub snooze_secs: u32,
    pub ring_limit_secs: u32,
}

impl Default for AlarmSettings {
    fn default() -> Self {
        Self {
            snooze_secs: SNOOZE_SECS,
            ring_limit_secs: RING_LIMIT_SECS,
        }
    }
}

/// Complete alarm state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmState {
    pub enabled: bool,
    /// Currently ringing
    pub active: bool,
    pub snoozed_until: Option<Timestamp>,
    /// Silenced for the rest of this episode
    pub muted: bool,
    pub target: TimeOfDay,
    /// Minute stamp of the last trigger
    pub last_triggered_minute: Option<u64>,
    /// When the current ringing stretch began
    pub ringing_since: Option<Timestamp>,
}

/// Something the engine did on its own during `evaluate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmEvent {
    /// Target minute reached
    Triggered,
    /// Snooze elapsed
    Resumed,
    /// Rang for the full ring limit without being handled
    TimedOut,
}

/// Summary for display and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmStatus {
    Off,
    Armed,
    Ringing,
    Muted,
    Snoozed(Timestamp),
}

#[derive(Debug, Clone)]
pub struct AlarmEngine {
    state: AlarmState,
    settings: AlarmSettings,
}

impl AlarmEngine {
    pub fn new(target: TimeOfDay, enabled: bool, settings: AlarmSettings) -> Self {
        Self {
            state: AlarmState {
                enabled,
                active: false,
                snoozed_until: None,
                muted: false,
                target,
                last_triggered_minute: None,
                ringing_since: None,
            },
            settings,
        }
    }

    pub fn state(&self) -> &AlarmState {
        &self.state
    }

    pub fn target(&self) -> TimeOfDay {
        self.state.target
    }

    /// Ringing and not muted
    pub fn is_sounding(&self) -> bool {
        self.state.active && !self.state.muted
    }

    pub fn status(&self) -> AlarmStatus {
        let s = &self.state;
        match (s.enabled, s.active, s.muted, s.snoozed_until) {
            (false, ..) => AlarmStatus::Off,
            (true, true, false, _) => AlarmStatus::Ringing,
            (true, true, true, _) => AlarmStatus::Muted,
            (true, false, _, Some(until)) => AlarmStatus::Snoozed(until),
            (true, false, _, None) => AlarmStatus::Armed,
        }
    }

    /// Flip `enabled`; disabling also stops ringing and drops any snooze
    ///
    /// Returns the new `enabled` value.
    pub fn toggle(&mut self) -> bool {
        let s = &mut self.state;
        s.enabled = !s.enabled;
        if !s.enabled {
            s.active = false;
            s.muted = false;
            s.snoozed_until = None;
            s.ringing_since = None;
        }
        s.enabled
    }

    /// Stop ringing until `now + snooze`. No-op unless ringing.
    pub fn snooze(&mut self, now: Timestamp) -> Option<Timestamp> {
        let s = &mut self.state;
        if !s.active {
            return None;
        }
        let until = now.add_secs(u64::from(self.settings.snooze_secs));
        s.active = false;
        s.ringing_since = None;
        s.snoozed_until = Some(until);
        Some(until)
    }

    /// Silence the rest of this episode. No-op unless ringing.
    pub fn mute(&mut self) -> bool {
        if !self.state.active || self.state.muted {
            return false;
        }
        self.state.muted = true;
        true
    }

    pub fn increment_hour(&mut self) -> TimeOfDay {
        self.state.target = self.state.target.next_hour();
        self.state.target
    }

    pub fn increment_minute(&mut self) -> TimeOfDay {
        self.state.target = self.state.target.next_minute();
        self.state.target
    }

    /// Advance the alarm against the current wall time
    pub fn evaluate(&mut self, now: Timestamp) -> Option<AlarmEvent> {
        let limit = u64::from(self.settings.ring_limit_secs);
        let s = &mut self.state;
        if !s.enabled {
            return None;
        }

        if s.active {
            let since = s.ringing_since.unwrap_or(now);
            if now.as_secs().saturating_sub(since.as_secs()) >= limit {
                s.active = false;
                s.ringing_since = None;
                return Some(AlarmEvent::TimedOut);
            }
            return None;
        }

        if let Some(until) = s.snoozed_until {
            if now < until {
                return None;
            }
            s.snoozed_until = None;
            s.active = true;
            s.muted = false;
            s.ringing_since = Some(now);
            return Some(AlarmEvent::Resumed);
        }

        let minute = now.minute_stamp();
        if now.time_of_day() == s.target && s.last_triggered_minute != Some(minute) {
            s.active = true;
            s.muted = false;
            s.last_triggered_minute = Some(minute);
            s.ringing_since = Some(now);
            return Some(AlarmEvent::Triggered);
        }

        None
    }
}
