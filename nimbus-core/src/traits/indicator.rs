//! Heartbeat indicator

/// A status output the main loop toggles once per wake
pub trait Indicator {
    fn toggle(&mut self);
}
