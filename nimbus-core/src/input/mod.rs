//! Button input handling
//!
//! Raw edges are timestamped where they are observed and classified here, in
//! the controller's context, one press/release pair at a time.

mod button;
mod classifier;
mod location;

pub use button::{Button, ButtonEvent, Edge};
pub use classifier::{ButtonClassifier, ClassifiedPress, PressClassifier, PressKind, Thresholds};
pub use location::{parse_location, LocationError};
