//! Collaborator traits
//!
//! Hardware and network access is abstracted behind these traits so the
//! controller runs unchanged on the device and in host tests.

mod display;
mod indicator;
mod input;
mod network;
mod sensor;

pub use display::{CharDisplay, DisplayError, Rgb};
pub use indicator::Indicator;
pub use input::TextInput;
pub use network::{
    serve, FetchError, FetchOutcome, FetchRequest, Headlines, NetworkServices, MAX_HEADLINES,
};
pub use sensor::{ClimateReading, ClimateSensor, SensorError};
