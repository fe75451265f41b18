//! Text frame buffer for the character display

use core::fmt::{self, Write};

use heapless::String;

use crate::traits::{CharDisplay, DisplayError, Rgb};

/// Visible characters per row
pub const DISPLAY_COLS: usize = 16;

pub const DISPLAY_ROWS: usize = 2;

/// Byte capacity for one row of up to `DISPLAY_COLS` UTF-8 characters
const LINE_CAP: usize = DISPLAY_COLS * 4;

pub type Line = String<LINE_CAP>;

/// Desired panel contents plus what was last sent to the panel
#[derive(Debug, Clone)]
pub struct TextFrame {
    lines: [Line; DISPLAY_ROWS],
    backlight: Rgb,
    shown: [Option<Line>; DISPLAY_ROWS],
    shown_backlight: Option<Rgb>,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFrame {
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| Line::new()),
            backlight: Rgb::WHITE,
            shown: core::array::from_fn(|_| None),
            shown_backlight: None,
        }
    }

    /// Blank both rows
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Set a row, cutting it at `DISPLAY_COLS` characters
    pub fn set_line(&mut self, row: usize, text: &str) {
        self.line_fmt(row, format_args!("{}", text));
    }

    /// Set a row from format arguments, cutting it at `DISPLAY_COLS` characters
    pub fn line_fmt(&mut self, row: usize, args: fmt::Arguments<'_>) {
        if let Some(line) = self.lines.get_mut(row) {
            line.clear();
            // LineWriter never fails; overflow is dropped
            let _ = LineWriter { line, chars: 0 }.write_fmt(args);
        }
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(|l| l.as_str()).unwrap_or("")
    }

    pub fn set_backlight(&mut self, color: Rgb) {
        self.backlight = color;
    }

    /// Forget what the panel shows, e.g. after it was cleared
    pub fn invalidate(&mut self) {
        self.shown = core::array::from_fn(|_| None);
        self.shown_backlight = None;
    }

    /// Send changed rows and backlight to the display
    ///
    /// Returns the number of rows written. On error the failed row stays
    /// marked as not shown and is retried on the next flush.
    pub fn flush<D: CharDisplay>(&mut self, display: &mut D) -> Result<usize, DisplayError> {
        if self.shown_backlight != Some(self.backlight) {
            display.set_backlight(self.backlight)?;
            self.shown_backlight = Some(self.backlight);
        }

        let mut written = 0;
        for (row, (line, shown)) in self.lines.iter().zip(self.shown.iter_mut()).enumerate() {
            if shown.as_ref() == Some(line) {
                continue;
            }
            display.write_line(row as u8, line)?;
            *shown = Some(line.clone());
            written += 1;
        }
        Ok(written)
    }
}

/// `fmt::Write` sink that keeps the first `DISPLAY_COLS` characters
struct LineWriter<'a> {
    line: &'a mut Line,
    chars: usize,
}

impl Write for LineWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.chars >= DISPLAY_COLS || self.line.push(c).is_err() {
                break;
            }
            self.chars += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;
    use std::vec::Vec;

    #[derive(Default)]
    struct RecordingDisplay {
        writes: Vec<(u8, std::string::String)>,
        backlights: Vec<Rgb>,
        fail_row: Option<u8>,
    }

    impl CharDisplay for RecordingDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }

        fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
            if self.fail_row == Some(row) {
                return Err(DisplayError::Bus);
            }
            self.writes.push((row, text.into()));
            Ok(())
        }

        fn set_backlight(&mut self, color: Rgb) -> Result<(), DisplayError> {
            self.backlights.push(color);
            Ok(())
        }
    }

    #[test]
    fn test_lines_cut_at_sixteen_chars() {
        let mut frame = TextFrame::new();
        frame.set_line(0, "0123456789abcdefXYZ");
        assert_eq!(frame.line(0), "0123456789abcdef");

        frame.line_fmt(1, format_args!("{}° {}", 21, "ÆØÅæøåÆØÅæøåÆØÅ"));
        assert_eq!(frame.line(1).chars().count(), DISPLAY_COLS);
    }

    #[test]
    fn test_out_of_range_row_ignored() {
        let mut frame = TextFrame::new();
        frame.set_line(5, "nope");
        assert_eq!(frame.line(5), "");
    }

    #[test]
    fn test_flush_sends_only_changes() {
        let mut frame = TextFrame::new();
        let mut display = RecordingDisplay::default();

        frame.set_line(0, "07:00");
        frame.set_line(1, "Alarm off");
        assert_eq!(frame.flush(&mut display), Ok(2));
        assert_eq!(display.backlights, [Rgb::WHITE]);

        frame.set_line(0, "07:01");
        frame.set_line(1, "Alarm off");
        assert_eq!(frame.flush(&mut display), Ok(1));
        assert_eq!(display.writes.last(), Some(&(0, "07:01".to_string())));
        assert_eq!(display.backlights.len(), 1);
    }

    #[test]
    fn test_invalidate_forces_full_redraw() {
        let mut frame = TextFrame::new();
        let mut display = RecordingDisplay::default();
        frame.set_line(0, "News");
        frame.flush(&mut display).unwrap();
        frame.invalidate();
        assert_eq!(frame.flush(&mut display), Ok(2));
        assert_eq!(display.backlights.len(), 2);
    }

    #[test]
    fn test_failed_row_retried() {
        let mut frame = TextFrame::new();
        let mut display = RecordingDisplay {
            fail_row: Some(1),
            ..Default::default()
        };
        frame.set_line(1, "Weather");
        assert_eq!(frame.flush(&mut display), Err(DisplayError::Bus));

        display.fail_row = None;
        assert_eq!(frame.flush(&mut display), Ok(1));
        assert_eq!(display.writes.last(), Some(&(1, "Weather".to_string())));
    }
}
