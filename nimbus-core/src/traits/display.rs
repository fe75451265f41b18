//! Character display trait

/// Errors that can occur when driving the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed (NACK, arbitration loss)
    Bus,
    /// Row outside the panel
    InvalidRow,
}

/// Backlight color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const AMBER: Rgb = Rgb::new(255, 120, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Line-oriented character display (16x2 LCD)
pub trait CharDisplay {
    /// Clear the entire panel
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Replace the contents of a row
    ///
    /// Text longer than the row is cut off; shorter text is padded with
    /// spaces so nothing from the previous contents remains.
    fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError>;

    fn set_backlight(&mut self, color: Rgb) -> Result<(), DisplayError>;
}
