//! Periodic refresh scheduling
//!
//! Each data source has its own timer. A timer that fires is re-armed at
//! once, whether or not the fetch it triggers succeeds, so a failing network
//! is retried at the normal cadence instead of on every tick.

mod refresh;
mod timer;

pub use refresh::{DueFetches, FetchKind, RefreshScheduler};
pub use timer::RefreshTimer;
