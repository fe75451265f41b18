//! Character display drivers

mod rgb1602;

pub use rgb1602::{Rgb1602, LCD_ADDRESS, RGB_ADDRESS};
