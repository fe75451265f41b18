//! Single interval timer

/// Fires when at least `interval_ms` has passed since it last fired
///
/// A timer that has never fired is due immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshTimer {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl RefreshTimer {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// A timer that last fired at `last_ms`
    pub const fn starting_at(interval_ms: u64, last_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: Some(last_ms),
        }
    }

    pub fn last_ms(&self) -> Option<u64> {
        self.last_ms
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        }
    }

    /// Fire if due, re-arming from `now_ms` unconditionally
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if !self.is_due(now_ms) {
            return false;
        }
        self.last_ms = Some(now_ms);
        true
    }

    /// Record an out-of-schedule fetch so the cadence restarts from it
    pub fn mark(&mut self, now_ms: u64) {
        self.last_ms = Some(now_ms);
    }
}
