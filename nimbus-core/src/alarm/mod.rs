//! Alarm engine
//!
//! Tracks the alarm target and its enabled/active/snoozed/muted state and
//! decides, once per tick, whether the alarm starts ringing.

mod engine;

pub use engine::{AlarmEngine, AlarmEvent, AlarmSettings, AlarmState, AlarmStatus};
