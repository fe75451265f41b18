//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Every producer feeds the one controller loop through `CONTROL_CHANNEL`.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use nimbus_core::controller::Message;
use nimbus_core::traits::FetchRequest;
use nimbus_core::Location;

/// Channel capacity for controller messages
const CONTROL_CHANNEL_SIZE: usize = 8;

/// Channel capacity for pending fetches (one per kind plus slack)
const FETCH_CHANNEL_SIZE: usize = 4;

/// Button edges, ticks, and fetch results for the controller
pub static CONTROL_CHANNEL: Channel<CriticalSectionRawMutex, Message, CONTROL_CHANNEL_SIZE> =
    Channel::new();

/// Requests for the fetch worker
pub static FETCH_CHANNEL: Channel<CriticalSectionRawMutex, FetchRequest, FETCH_CHANNEL_SIZE> =
    Channel::new();

/// Most recent line typed on the console (older lines are overwritten)
pub static LOCATION_INPUT: Signal<CriticalSectionRawMutex, Location> = Signal::new();
