//! Runtime fault taxonomy
//!
//! None of these stop the main loop. The controller records the most recent
//! one for the heartbeat diagnostic and carries on with cached data.

use crate::input::LocationError;
use crate::scheduler::FetchKind;
use crate::traits::{DisplayError, FetchError, SensorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// A fetch failed or timed out; retried at the next scheduled interval
    TransientFetch(FetchKind, FetchError),
    /// The typed location was rejected; the user is prompted again
    InvalidUserInput(LocationError),
    /// The weather service did not know the location
    UnknownLocation,
    /// The climate sensor could not be read; "no data" is shown
    SensorRead(SensorError),
    /// The display did not accept an update
    Display(DisplayError),
}

impl Fault {
    /// Faults that clear on their own once the next attempt succeeds
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Fault::TransientFetch(..) | Fault::SensorRead(_) | Fault::Display(_)
        )
    }
}
