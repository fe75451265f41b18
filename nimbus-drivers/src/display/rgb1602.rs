//! RGB-backlit 16x2 LCD module
//!
//! The module carries two I2C devices: an AiP31068 (HD44780-compatible)
//! character controller and a PCA9633 four-channel LED driver for the
//! backlight.
//!
//! Every transfer to the LCD starts with a control byte: 0x80 for a
//! command, 0x40 for a run of data bytes written at the cursor.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use nimbus_core::render::DISPLAY_COLS;
use nimbus_core::traits::{CharDisplay, DisplayError, Rgb};

/// Character controller address
pub const LCD_ADDRESS: u8 = 0x3E;
/// Backlight LED driver address
pub const RGB_ADDRESS: u8 = 0x60;

const CONTROL_COMMAND: u8 = 0x80;
const CONTROL_DATA: u8 = 0x40;

// HD44780 instruction set
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_LEFT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

// PCA9633 registers
const REG_MODE1: u8 = 0x00;
const REG_MODE2: u8 = 0x01;
const REG_BLUE: u8 = 0x02;
const REG_GREEN: u8 = 0x03;
const REG_RED: u8 = 0x04;
const REG_LEDOUT: u8 = 0x08;

/// Character ROM code for the degree sign
const ROM_DEGREE: u8 = 0xDF;

/// Map a char to the controller's ROM (A00 table)
fn rom_code(c: char) -> u8 {
    match c {
        ' '..='}' => c as u8,
        '°' => ROM_DEGREE,
        _ => b'?',
    }
}

/// 16x2 LCD with RGB backlight on a blocking I2C bus
pub struct Rgb1602<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C: I2c, D: DelayNs> Rgb1602<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Power up both devices and leave the panel blank with a white
    /// backlight
    pub fn init(&mut self) -> Result<(), DisplayError> {
        // Controller needs >15ms after VDD rises
        self.delay.delay_ms(50);

        // Function set is repeated per the HD44780 power-on sequence
        for _ in 0..3 {
            self.command(CMD_FUNCTION_2LINE)?;
            self.delay.delay_ms(5);
        }
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE_LEFT)?;

        self.led_register(REG_MODE1, 0x00)?;
        // All four outputs under individual PWM control
        self.led_register(REG_LEDOUT, 0xFF)?;
        // Group control: blinking
        self.led_register(REG_MODE2, 0x20)?;

        self.set_backlight(Rgb::WHITE)
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(LCD_ADDRESS, &[CONTROL_COMMAND, cmd])
            .map_err(|_| DisplayError::Bus)
    }

    fn led_register(&mut self, reg: u8, value: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(RGB_ADDRESS, &[reg, value])
            .map_err(|_| DisplayError::Bus)
    }
}

impl<I2C: I2c, D: DelayNs> CharDisplay for Rgb1602<I2C, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        let offset = *ROW_OFFSETS
            .get(usize::from(row))
            .ok_or(DisplayError::InvalidRow)?;
        self.command(CMD_SET_DDRAM | offset)?;

        let mut buf = [b' '; DISPLAY_COLS + 1];
        buf[0] = CONTROL_DATA;
        for (slot, c) in buf[1..].iter_mut().zip(text.chars()) {
            *slot = rom_code(c);
        }

        self.i2c
            .write(LCD_ADDRESS, &buf)
            .map_err(|_| DisplayError::Bus)
    }

    fn set_backlight(&mut self, color: Rgb) -> Result<(), DisplayError> {
        self.led_register(REG_RED, color.r)?;
        self.led_register(REG_GREEN, color.g)?;
        self.led_register(REG_BLUE, color.b)
    }
}
