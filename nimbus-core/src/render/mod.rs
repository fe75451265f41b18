//! Screen rendering
//!
//! Each screen renders into a [`TextFrame`] sized for the 16x2 panel; the
//! frame then pushes only the rows that changed to the display.

mod frame;
mod screens;

pub use frame::{Line, TextFrame, DISPLAY_COLS, DISPLAY_ROWS};
pub use screens::{
    render_climate, render_clock, render_location, render_news, render_weather, InputPrompt,
    NewsCursor, WeatherView,
};
