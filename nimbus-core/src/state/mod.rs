//! Screen state machine
//!
//! The clock shows one of five screens. A long press on the alarm button
//! rotates through them; the news screen returns to the clock on its own.

mod navigator;
mod screen;

pub use navigator::{Navigator, NewsFeedWindow};
pub use screen::{Screen, ScreenEvent};
